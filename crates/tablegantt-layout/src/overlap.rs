//! Interval overlap arithmetic over inclusive day ranges.
//!
//! Break periods may overlap each other, so the days a task loses to breaks
//! are measured against the merged union of the overlaps, never the sum of
//! per-break overlaps.

use tablegantt_core::{BreakPeriod, DateRange};

/// Number of days shared by two inclusive ranges, `0` when disjoint.
pub fn overlap_days(a: &DateRange, b: &DateRange) -> i64 {
    a.intersect(b).map_or(0, |shared| shared.days())
}

/// Merge ranges into a sorted, non-overlapping list.
///
/// A range merges into the running one when it starts on or before the
/// running end, so ranges touching at an endpoint collapse into one.
pub fn union_intervals(intervals: &[DateRange]) -> Vec<DateRange> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|r| (r.start(), r.end()));

    let mut merged: Vec<DateRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        if let Some(last) = merged.last_mut() {
            if range.start() <= last.end() {
                last.extend_to(range.end());
                continue;
            }
        }
        merged.push(range);
    }
    merged
}

/// The parts of `task` covered by breaks, merged.
pub fn break_coverage(task: &DateRange, breaks: &[BreakPeriod]) -> Vec<DateRange> {
    let overlaps: Vec<DateRange> = breaks
        .iter()
        .filter_map(|b| task.intersect(&b.range))
        .collect();
    union_intervals(&overlaps)
}

/// Days of `task` that fall inside at least one break.
pub fn net_break_days(task: &DateRange, breaks: &[BreakPeriod]) -> i64 {
    break_coverage(task, breaks).iter().map(DateRange::days).sum()
}
