//! Task placement within the window and window-independent task metrics.

use chrono::NaiveDate;
use tablegantt_core::date::days_between;
use tablegantt_core::{BreakPeriod, DateRange, Task, TaskMetrics, TaskPlacement, VisibleWindow};

use crate::overlap::net_break_days;

/// Column placement of a task span, or `None` when it misses the window.
///
/// The bar is clipped to the window, so it never spans more columns than
/// the window has days. A task ending exactly on the window start is placed.
pub fn place_task(span: &DateRange, window: &VisibleWindow) -> Option<TaskPlacement> {
    let active = span.intersect(&window.range())?;

    let leading_gap = (days_between(window.start(), active.start()) - 1) as usize;
    let span_days = active.days() as usize;
    let trailing_gap = window.total_days() - leading_gap - span_days;

    Some(TaskPlacement {
        leading_gap,
        span_days,
        trailing_gap,
    })
}

/// Duration, break and due figures for a task.
pub fn task_metrics(task: &Task, breaks: &[BreakPeriod], today: NaiveDate) -> TaskMetrics {
    let total_days = task.range.days();
    let break_days = net_break_days(&task.range, breaks);
    TaskMetrics {
        total_days,
        break_days,
        active_days: total_days - break_days,
        due_offset_days: (task.end() - today).num_days(),
    }
}

/// Input indices of `tasks` ordered by ascending end date, ties in input order.
pub fn order_by_end(tasks: &[Task]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..tasks.len()).collect();
    order.sort_by_key(|&idx| tasks[idx].end());
    order
}
