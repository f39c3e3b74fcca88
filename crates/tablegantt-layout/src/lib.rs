//! # tablegantt-layout
//!
//! Timeline layout engine for table-based Gantt charts.
//!
//! This crate provides:
//! - Interval overlap arithmetic (break unions, net break days)
//! - Visible-day enumeration and Monday-aligned week grouping
//! - Per-day annotations (break, major date, today)
//! - Task placement (leading gap, span, trailing gap) clipped to the window
//! - Task metrics (total, break, active days and due offset)
//!
//! Layout is recomputed from scratch for every `(chart, window)` pair. The
//! only ambient input is "today", supplied by an injected [`Clock`].
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tablegantt_core::{ChartData, DateRange, LayoutEngine, Task};
//! use tablegantt_layout::{FixedClock, TableLayoutEngine};
//!
//! let d = |m, day| NaiveDate::from_ymd_opt(2024, m, day).unwrap();
//! let mut chart = ChartData::new("Demo", DateRange::new(d(3, 1), d(3, 31)).unwrap());
//! chart.tasks.push(Task::new("A", DateRange::new(d(3, 1), d(3, 10)).unwrap()));
//!
//! let engine = TableLayoutEngine::new().with_clock(FixedClock(d(3, 5)));
//! let layout = engine.layout(&chart, &chart.default_window());
//! assert_eq!(layout.total_days(), 31);
//! assert_eq!(layout.rows[0].placement.span_days, 10);
//! assert_eq!(layout.today_index(), Some(4));
//! ```

pub mod clock;
pub mod overlap;
pub mod placement;
pub mod timeline;

pub use clock::{Clock, FixedClock, SystemClock};
pub use overlap::{break_coverage, net_break_days, overlap_days, union_intervals};
pub use placement::{order_by_end, place_task, task_metrics};
pub use timeline::{
    annotate_days, build_visible_days, group_by_week, is_break_day, is_major_date,
    major_date_label,
};

use chrono::NaiveDate;
use tablegantt_core::{
    color_index, ChartData, ExcludedTask, Layout, LayoutEngine, TaskRow, VisibleWindow,
    DEFAULT_PALETTE,
};
use tracing::{debug, trace};

/// Layout settings independent of the clock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Number of palette slots task categories wrap into
    pub palette_size: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE.len(),
        }
    }
}

/// Layout engine for the table chart
#[derive(Clone, Debug, Default)]
pub struct TableLayoutEngine<C = SystemClock> {
    clock: C,
    /// Layout settings
    pub options: LayoutOptions,
}

impl TableLayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> TableLayoutEngine<C> {
    /// Replace the clock (e.g. with a [`FixedClock`] in tests)
    pub fn with_clock<D: Clock>(self, clock: D) -> TableLayoutEngine<D> {
        TableLayoutEngine {
            clock,
            options: self.options,
        }
    }

    /// Set the number of palette slots
    pub fn palette_size(mut self, size: usize) -> Self {
        self.options.palette_size = size;
        self
    }
}

impl<C: Clock> LayoutEngine for TableLayoutEngine<C> {
    fn layout(&self, chart: &ChartData, window: &VisibleWindow) -> Layout {
        compute_layout(chart, window, self.clock.today(), &self.options)
    }
}

/// Lay out `chart` over `window` as of `today`.
pub fn compute_layout(
    chart: &ChartData,
    window: &VisibleWindow,
    today: NaiveDate,
    options: &LayoutOptions,
) -> Layout {
    let visible = build_visible_days(window);
    let weeks = group_by_week(&visible);
    let days = annotate_days(&visible, &chart.breaks, &chart.major_dates, today);

    let mut rows = Vec::new();
    let mut excluded = Vec::new();

    for idx in order_by_end(&chart.tasks) {
        let task = &chart.tasks[idx];
        let Some(placement) = place_task(&task.range, window) else {
            trace!(task = %task.name, "Task outside visible window");
            excluded.push(ExcludedTask {
                task_index: idx,
                name: task.name.clone(),
                start: task.start(),
                end: task.end(),
            });
            continue;
        };

        trace!(
            task = %task.name,
            leading = placement.leading_gap,
            span = placement.span_days,
            trailing = placement.trailing_gap,
            "Placed task"
        );

        rows.push(TaskRow {
            task_index: idx,
            name: task.name.clone(),
            start: task.start(),
            end: task.end(),
            category: task.category,
            type_label: chart.type_label(task.category).map(str::to_string),
            color_index: color_index(task.category, options.palette_size),
            important: task.important,
            placement,
            metrics: task_metrics(task, &chart.breaks, today),
        });
    }

    debug!(
        window = %window.range(),
        days = days.len(),
        weeks = weeks.len(),
        placed = rows.len(),
        excluded = excluded.len(),
        "Computed layout"
    );

    Layout {
        window: *window,
        today,
        days,
        weeks,
        rows,
        excluded,
    }
}
