//! Chart JSON format.
//!
//! ```json
//! {
//!   "title": "Season Plan",
//!   "global_start_date": "2024-03-01",
//!   "global_end_date": "2024-05-31",
//!   "types": ["Mechanical", "Software"],
//!   "tasks": [
//!     { "name": "Drive base", "start_date": "2024-03-01", "end_date": "2024-03-10",
//!       "type": 0, "important": true }
//!   ],
//!   "breaks": [ { "start_date": "2024-03-04", "end_date": "2024-03-06" } ],
//!   "major_dates": [ { "date": "2024-04-15", "name": "Kickoff" } ]
//! }
//! ```
//!
//! Dates stay strings during deserialization so malformed values surface as
//! [`ChartError::MalformedDate`] with the field location attached.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

use tablegantt_core::date::parse_date;
use tablegantt_core::{BreakPeriod, ChartData, ChartError, DateRange, MajorDate, Task};

use crate::ParseError;

#[derive(Debug, Deserialize)]
struct ChartFile {
    title: String,
    global_start_date: String,
    global_end_date: String,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    breaks: Vec<BreakRecord>,
    #[serde(default)]
    major_dates: Vec<MajorDateRecord>,
}

#[derive(Debug, Deserialize)]
struct TaskRecord {
    name: String,
    start_date: String,
    end_date: String,
    #[serde(rename = "type", default)]
    category: i64,
    #[serde(default)]
    important: bool,
}

#[derive(Debug, Deserialize)]
struct BreakRecord {
    start_date: String,
    end_date: String,
}

#[derive(Debug, Deserialize)]
struct MajorDateRecord {
    date: String,
    name: String,
}

/// Parse and validate a chart document
pub fn parse(input: &str) -> Result<ChartData, ParseError> {
    let file: ChartFile = serde_json::from_str(input)?;

    let global_start = field_date(&file.global_start_date, "global_start_date")?;
    let global_end = field_date(&file.global_end_date, "global_end_date")?;
    let global_range = DateRange::checked("global range", global_start, global_end)
        .map_err(|e| invalid("global_end_date", e))?;

    let mut chart = ChartData::new(file.title, global_range);
    chart.types = file.types;

    for (idx, record) in file.tasks.into_iter().enumerate() {
        let task = convert_task(idx, record)?;
        if chart.type_label(task.category).is_none() {
            warn!(
                task = %task.name,
                category = task.category,
                declared = chart.types.len(),
                "Task type outside declared types; colour wraps by modulo"
            );
        }
        chart.tasks.push(task);
    }

    for (idx, record) in file.breaks.into_iter().enumerate() {
        chart.breaks.push(convert_break(idx, record)?);
    }

    for (idx, record) in file.major_dates.into_iter().enumerate() {
        let location = format!("major_dates[{idx}].date");
        let date = field_date(&record.date, &location)?;
        chart.major_dates.push(MajorDate::new(date, record.name));
    }

    debug!(
        title = %chart.title,
        tasks = chart.tasks.len(),
        breaks = chart.breaks.len(),
        major_dates = chart.major_dates.len(),
        "Parsed chart"
    );

    Ok(chart)
}

fn convert_task(idx: usize, record: TaskRecord) -> Result<Task, ParseError> {
    let start = field_date(&record.start_date, &format!("tasks[{idx}].start_date"))?;
    let end = field_date(&record.end_date, &format!("tasks[{idx}].end_date"))?;
    let range = DateRange::checked(format!("task {:?}", record.name), start, end)
        .map_err(|e| invalid(format!("tasks[{idx}]"), e))?;

    let mut task = Task::new(record.name, range).category(record.category);
    task.important = record.important;
    Ok(task)
}

fn convert_break(idx: usize, record: BreakRecord) -> Result<BreakPeriod, ParseError> {
    let start = field_date(&record.start_date, &format!("breaks[{idx}].start_date"))?;
    let end = field_date(&record.end_date, &format!("breaks[{idx}].end_date"))?;
    let range = DateRange::checked(format!("break #{}", idx + 1), start, end)
        .map_err(|e| invalid(format!("breaks[{idx}]"), e))?;
    Ok(BreakPeriod::new(range))
}

fn field_date(value: &str, location: &str) -> Result<NaiveDate, ParseError> {
    parse_date(value).map_err(|e| invalid(location, e))
}

fn invalid(location: impl Into<String>, source: ChartError) -> ParseError {
    ParseError::Invalid {
        location: location.into(),
        source,
    }
}
