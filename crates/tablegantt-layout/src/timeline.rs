//! Visible days, week grouping and per-day annotations.

use chrono::NaiveDate;
use tablegantt_core::date::monday_of;
use tablegantt_core::{BreakPeriod, DayColumn, MajorDate, VisibleWindow, WeekGroup};

/// One entry per calendar day of the window, in order.
pub fn build_visible_days(window: &VisibleWindow) -> Vec<NaiveDate> {
    window.range().iter_days().collect()
}

/// Partition days into maximal runs sharing the same Monday.
///
/// Boundaries fall exactly where the Monday changes, so the first and last
/// groups may be partial weeks.
pub fn group_by_week(days: &[NaiveDate]) -> Vec<WeekGroup> {
    let mut groups: Vec<WeekGroup> = Vec::new();
    for (index, &day) in days.iter().enumerate() {
        let monday = monday_of(day);
        match groups.last_mut() {
            Some(group) if group.monday == monday => group.day_count += 1,
            _ => groups.push(WeekGroup {
                monday,
                start_index: index,
                day_count: 1,
            }),
        }
    }
    groups
}

/// True when `date` lies within any break.
pub fn is_break_day(date: NaiveDate, breaks: &[BreakPeriod]) -> bool {
    breaks.iter().any(|b| b.contains(date))
}

/// True when `date` is a major date.
pub fn is_major_date(date: NaiveDate, major_dates: &[MajorDate]) -> bool {
    major_dates.iter().any(|md| md.date == date)
}

/// Label of the first major date on `date`, in list order.
pub fn major_date_label(date: NaiveDate, major_dates: &[MajorDate]) -> Option<&str> {
    major_dates
        .iter()
        .find(|md| md.date == date)
        .map(|md| md.name.as_str())
}

/// Annotate each visible day.
pub fn annotate_days(
    days: &[NaiveDate],
    breaks: &[BreakPeriod],
    major_dates: &[MajorDate],
    today: NaiveDate,
) -> Vec<DayColumn> {
    days.iter()
        .enumerate()
        .map(|(index, &date)| {
            let major_label = major_date_label(date, major_dates).map(str::to_string);
            DayColumn {
                index,
                date,
                is_break: is_break_day(date, breaks),
                is_major: major_label.is_some(),
                is_today: date == today,
                major_label,
            }
        })
        .collect()
}
