//! Layout result types.
//!
//! A [`Layout`] is plain data: presentation adapters draw it without calling
//! back into the engine. Column indices are day offsets from the window start.

use chrono::NaiveDate;
use serde::Serialize;

use crate::VisibleWindow;

/// The full grid description for one chart and one visible window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Layout {
    /// Window the grid was computed for
    pub window: VisibleWindow,
    /// Date the "today" marker and due offsets were computed against
    pub today: NaiveDate,
    /// One column per visible day, in order
    pub days: Vec<DayColumn>,
    /// Week super-header groups, in order
    pub weeks: Vec<WeekGroup>,
    /// Placed tasks, sorted by ascending end date (stable)
    pub rows: Vec<TaskRow>,
    /// Tasks with no day inside the window
    pub excluded: Vec<ExcludedTask>,
}

impl Layout {
    /// Number of day columns.
    pub fn total_days(&self) -> usize {
        self.days.len()
    }

    /// Column of the today marker, when today is visible.
    pub fn today_index(&self) -> Option<usize> {
        self.days.iter().position(|d| d.is_today)
    }

    /// True when no task intersects the window.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single visible day with its annotations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub index: usize,
    pub date: NaiveDate,
    pub is_break: bool,
    pub is_major: bool,
    pub is_today: bool,
    /// Label of the first major date on this day
    pub major_label: Option<String>,
}

/// A maximal run of visible days sharing the same Monday.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WeekGroup {
    /// Monday of the week (may precede the window start)
    pub monday: NaiveDate,
    /// Column of the first day in the group
    pub start_index: usize,
    /// Number of visible days in the group
    pub day_count: usize,
}

/// Column placement of a task bar within the window.
///
/// `leading_gap + span_days + trailing_gap` equals the window's day count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TaskPlacement {
    /// Empty columns before the bar
    pub leading_gap: usize,
    /// Columns covered by the bar, clipped to the window
    pub span_days: usize,
    /// Empty columns after the bar
    pub trailing_gap: usize,
}

impl TaskPlacement {
    /// Column index just past the bar.
    pub fn end_index(&self) -> usize {
        self.leading_gap + self.span_days
    }

    pub fn total_columns(&self) -> usize {
        self.leading_gap + self.span_days + self.trailing_gap
    }
}

/// Derived task figures, independent of the visible window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TaskMetrics {
    /// Full inclusive duration
    pub total_days: i64,
    /// Days covered by the union of breaks
    pub break_days: i64,
    /// `total_days - break_days`
    pub active_days: i64,
    /// Whole days from today to the end date; negative when overdue
    pub due_offset_days: i64,
}

impl TaskMetrics {
    /// The "Days" column text: `"10"`, or `"10 (7)"` when breaks apply.
    pub fn days_label(&self) -> String {
        if self.break_days > 0 {
            format!("{} ({})", self.total_days, self.active_days)
        } else {
            self.total_days.to_string()
        }
    }

    pub fn due_status(&self) -> DueStatus {
        match self.due_offset_days {
            0 => DueStatus::DueToday,
            n if n > 0 => DueStatus::Remaining(n),
            n => DueStatus::Overdue(-n),
        }
    }
}

/// Position of a task's end date relative to today.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DueStatus {
    /// Days left until the end date
    Remaining(i64),
    DueToday,
    /// Days past the end date
    Overdue(i64),
}

impl std::fmt::Display for DueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueStatus::Remaining(1) => write!(f, "1 day left"),
            DueStatus::Remaining(n) => write!(f, "{n} days left"),
            DueStatus::DueToday => write!(f, "Due today"),
            DueStatus::Overdue(1) => write!(f, "1 day overdue"),
            DueStatus::Overdue(n) => write!(f, "{n} days overdue"),
        }
    }
}

/// A task that has at least one day inside the window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TaskRow {
    /// Position of the task in the chart's input order
    pub task_index: usize,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Raw category index as given
    pub category: i64,
    /// Declared label for the category, if in range
    pub type_label: Option<String>,
    /// Palette slot after modulo
    pub color_index: usize,
    pub important: bool,
    pub placement: TaskPlacement,
    pub metrics: TaskMetrics,
}

/// A task left out of the grid because it lies outside the window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExcludedTask {
    pub task_index: usize,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}
