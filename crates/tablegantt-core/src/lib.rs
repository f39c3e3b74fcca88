//! # tablegantt-core
//!
//! Core domain model and traits for the tablegantt layout engine.
//!
//! This crate provides:
//! - Domain types: `ChartData`, `Task`, `BreakPeriod`, `MajorDate`, `VisibleWindow`
//! - Day-granularity date arithmetic (`date` module) and the inclusive `DateRange`
//! - Layout result types consumed by presentation adapters (`layout` module)
//! - Core traits: `LayoutEngine`, `Renderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use tablegantt_core::{ChartData, DateRange, Task, BreakPeriod};
//! use tablegantt_core::date::parse_date;
//!
//! let range = |a: &str, b: &str| {
//!     DateRange::new(parse_date(a).unwrap(), parse_date(b).unwrap()).unwrap()
//! };
//!
//! let mut chart = ChartData::new("Robotics Season", range("2024-03-01", "2024-05-31"));
//! chart.types = vec!["Mechanical".into(), "Software".into()];
//! chart.tasks.push(Task::new("Drive base", range("2024-03-01", "2024-03-10")).category(0));
//! chart.breaks.push(BreakPeriod::new(range("2024-03-04", "2024-03-06")));
//! assert_eq!(chart.type_label(0), Some("Mechanical"));
//! ```

pub mod date;
pub mod layout;

pub use layout::{
    DayColumn, DueStatus, ExcludedTask, Layout, TaskMetrics, TaskPlacement, TaskRow, WeekGroup,
};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Colours used for task bars when no custom palette is configured.
pub const DEFAULT_PALETTE: [&str; 4] = ["#fb6262", "#ff9900", "#dada8a", "#6d9eeb"];

// ============================================================================
// Date Range
// ============================================================================

/// Inclusive range of calendar days with `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ChartError> {
        Self::checked("range", start, end)
    }

    /// Create a range, naming the offending entity in the error.
    pub fn checked(
        what: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, ChartError> {
        if end < start {
            return Err(ChartError::InvertedRange {
                what: what.into(),
                start,
                end,
            });
        }
        Ok(Self { start, end })
    }

    /// A one-day range.
    pub const fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both endpoints.
    pub fn days(&self) -> i64 {
        date::days_between(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// True when the two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The days shared by both ranges, if any.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateRange { start, end })
    }

    /// Grow the range so it ends no earlier than `end`.
    pub fn extend_to(&mut self, end: NaiveDate) {
        self.end = self.end.max(end);
    }

    /// Every day in the range, in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.days() as usize)
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}..{}",
            date::format_date(self.start),
            date::format_date(self.end)
        )
    }
}

// ============================================================================
// Chart
// ============================================================================

/// A complete chart definition, as loaded from a chart file.
///
/// Replaced wholesale on reload; layout never mutates it.
#[derive(Clone, Debug, Serialize)]
pub struct ChartData {
    /// Title shown above the chart
    pub title: String,
    /// Full date range of the data (`global_start_date..global_end_date`)
    pub global_range: DateRange,
    /// Category labels, indexed by `Task::category`
    pub types: Vec<String>,
    /// Tasks in input order
    pub tasks: Vec<Task>,
    /// Break periods (holidays, shutdowns)
    pub breaks: Vec<BreakPeriod>,
    /// Labelled milestone dates
    pub major_dates: Vec<MajorDate>,
}

impl ChartData {
    /// Create an empty chart covering `global_range`.
    pub fn new(title: impl Into<String>, global_range: DateRange) -> Self {
        Self {
            title: title.into(),
            global_range,
            types: Vec::new(),
            tasks: Vec::new(),
            breaks: Vec::new(),
            major_dates: Vec::new(),
        }
    }

    /// The window shown before the user picks a range: the global range.
    pub fn default_window(&self) -> VisibleWindow {
        VisibleWindow::from_range(self.global_range)
    }

    /// Category label for a task type, when it indexes the declared `types`.
    pub fn type_label(&self, category: i64) -> Option<&str> {
        usize::try_from(category)
            .ok()
            .and_then(|idx| self.types.get(idx))
            .map(String::as_str)
    }
}

/// A task bar on the chart. Dates are given, never computed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Task {
    /// Human-readable name
    pub name: String,
    /// Inclusive span of the task
    pub range: DateRange,
    /// Index into the chart's `types` and colour palette; wraps via modulo
    pub category: i64,
    /// High-priority flag
    pub important: bool,
}

impl Task {
    /// Create a task in category 0
    pub fn new(name: impl Into<String>, range: DateRange) -> Self {
        Self {
            name: name.into(),
            range,
            category: 0,
            important: false,
        }
    }

    /// Set the category index
    pub fn category(mut self, category: i64) -> Self {
        self.category = category;
        self
    }

    /// Mark as high priority
    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.range.start()
    }

    pub fn end(&self) -> NaiveDate {
        self.range.end()
    }
}

/// A period during which no work happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BreakPeriod {
    pub range: DateRange,
}

impl BreakPeriod {
    pub fn new(range: DateRange) -> Self {
        Self { range }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range.contains(date)
    }
}

/// A labelled calendar date (milestone, deadline).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MajorDate {
    pub date: NaiveDate,
    pub name: String,
}

impl MajorDate {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// The inclusive date range currently being rendered.
///
/// Independent of the chart's global range once the chart is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisibleWindow {
    range: DateRange,
}

impl VisibleWindow {
    /// Create a window, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ChartError> {
        DateRange::checked("visible window", start, end).map(Self::from_range)
    }

    pub const fn from_range(range: DateRange) -> Self {
        Self { range }
    }

    pub const fn range(&self) -> DateRange {
        self.range
    }

    pub const fn start(&self) -> NaiveDate {
        self.range.start()
    }

    pub const fn end(&self) -> NaiveDate {
        self.range.end()
    }

    /// Number of day columns in the window.
    pub fn total_days(&self) -> usize {
        self.range.days() as usize
    }

    /// Column index of `date`, if visible.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.range
            .contains(date)
            .then(|| (date - self.start()).num_days() as usize)
    }
}

/// Palette slot for a task category.
///
/// Uses true modulo so negative categories still land in the palette.
/// An empty palette maps everything to slot 0.
pub fn color_index(category: i64, palette_size: usize) -> usize {
    if palette_size == 0 {
        return 0;
    }
    category.rem_euclid(palette_size as i64) as usize
}

// ============================================================================
// Traits
// ============================================================================

/// Computes the grid layout of a chart for a visible window.
pub trait LayoutEngine {
    /// Lay out `chart` over `window`. Pure apart from the engine's clock.
    fn layout(&self, chart: &ChartData, window: &VisibleWindow) -> Layout;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a computed layout to the output format
    fn render(&self, chart: &ChartData, layout: &Layout) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Invalid chart input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("Malformed date {input:?}: expected a real calendar date as YYYY-MM-DD")]
    MalformedDate { input: String },

    #[error("Inverted range for {what}: end {end} precedes start {start}")]
    InvertedRange {
        what: String,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
