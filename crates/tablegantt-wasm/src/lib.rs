//! WebAssembly bindings for the tablegantt layout engine
//!
//! This crate provides JavaScript-callable functions for loading chart files,
//! computing layouts and rendering charts directly in the browser.

use chrono::NaiveDate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use tablegantt_core::date::{format_date, parse_date};
use tablegantt_core::{ChartData, Layout, LayoutEngine, Renderer, VisibleWindow};
use tablegantt_layout::{Clock, FixedClock, SystemClock, TableLayoutEngine};
use tablegantt_parser::parse_chart;
use tablegantt_render::{HtmlTableRenderer, SvgRenderer};

/// Initialize panic hook for better error messages in console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Lay out a chart from its JSON text and return the layout as JSON
///
/// `from`/`to` default to the chart's global range, `today` to the local date.
#[wasm_bindgen]
pub fn layout_chart(
    chart_json: &str,
    from: Option<String>,
    to: Option<String>,
    today: Option<String>,
) -> Result<String, JsValue> {
    layout_chart_internal(chart_json, from.as_deref(), to.as_deref(), today.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Render a chart from its JSON text as a standalone HTML document
#[wasm_bindgen]
pub fn render_html(
    chart_json: &str,
    from: Option<String>,
    to: Option<String>,
    today: Option<String>,
    day_width: u32,
) -> Result<String, JsValue> {
    render_html_internal(
        chart_json,
        from.as_deref(),
        to.as_deref(),
        today.as_deref(),
        day_width,
    )
    .map_err(|e| JsValue::from_str(&e))
}

fn layout_chart_internal(
    chart_json: &str,
    from: Option<&str>,
    to: Option<&str>,
    today: Option<&str>,
) -> Result<String, String> {
    let (_, layout) = compute(chart_json, from, to, today)?;
    serde_json::to_string(&layout).map_err(|e| format!("Serialization error: {}", e))
}

fn render_html_internal(
    chart_json: &str,
    from: Option<&str>,
    to: Option<&str>,
    today: Option<&str>,
    day_width: u32,
) -> Result<String, String> {
    let (chart, layout) = compute(chart_json, from, to, today)?;
    HtmlTableRenderer::new()
        .day_width(day_width)
        .render(&chart, &layout)
        .map_err(|e| format!("Render error: {}", e))
}

fn compute(
    chart_json: &str,
    from: Option<&str>,
    to: Option<&str>,
    today: Option<&str>,
) -> Result<(ChartData, Layout), String> {
    let chart = parse_chart(chart_json).map_err(|e| format!("Parse error: {}", e))?;
    let window = resolve_window(&chart, from, to)?;
    let today = resolve_today(today)?;
    let layout = TableLayoutEngine::new()
        .with_clock(FixedClock(today))
        .layout(&chart, &window);
    Ok((chart, layout))
}

fn resolve_window(
    chart: &ChartData,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<VisibleWindow, String> {
    let start = match from {
        Some(value) => date_field("from", value)?,
        None => chart.global_range.start(),
    };
    let end = match to {
        Some(value) => date_field("to", value)?,
        None => chart.global_range.end(),
    };
    VisibleWindow::new(start, end).map_err(|e| e.to_string())
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate, String> {
    match today {
        Some(value) => date_field("today", value),
        None => Ok(SystemClock.today()),
    }
}

fn date_field(name: &str, value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| format!("Invalid {}: {}", name, e))
}

// ============================================================================
// Chart Session
// ============================================================================

/// Result envelope returned to JavaScript
#[derive(Serialize)]
struct SessionResult<T: Serialize> {
    success: bool,
    error: Option<String>,
    data: Option<T>,
}

/// What the page needs to fill its title and range inputs
#[derive(Serialize, Debug, PartialEq)]
struct ChartSummary {
    title: String,
    global_start: String,
    global_end: String,
    visible_start: String,
    visible_end: String,
    types: Vec<String>,
    task_count: usize,
    break_count: usize,
    major_date_count: usize,
}

/// A loaded chart plus the current view settings
///
/// Changing the range, zoom or today only re-runs layout; the chart JSON is
/// parsed once per load.
#[wasm_bindgen]
pub struct ChartSession {
    chart: Option<ChartData>,
    window: Option<VisibleWindow>,
    today: Option<NaiveDate>,
    day_width: u32,
    dark_theme: bool,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl ChartSession {
    /// Create an empty session
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            chart: None,
            window: None,
            today: None,
            day_width: 20,
            dark_theme: false,
            last_error: None,
        }
    }

    /// Load a chart, resetting the visible range to its global range
    pub fn load(&mut self, chart_json: &str) -> JsValue {
        let result = self.load_internal(chart_json);
        self.respond(result)
    }

    /// Apply a new visible range
    pub fn set_range(&mut self, from: &str, to: &str) -> JsValue {
        let result = self.set_range_internal(from, to);
        self.respond(result)
    }

    /// Pin "today" to a date, or follow the local clock with an empty string
    pub fn set_today(&mut self, today: &str) -> JsValue {
        let result = self.set_today_internal(today);
        self.respond(result)
    }

    /// Set the day column width in pixels (zoom)
    pub fn set_day_width(&mut self, width: u32) {
        self.day_width = width.clamp(4, 200);
    }

    /// Toggle dark theme
    pub fn set_dark_theme(&mut self, enabled: bool) {
        self.dark_theme = enabled;
    }

    /// Check if a chart is loaded
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// Last error message, if the previous call failed
    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    /// Layout of the current view as JSON, or empty string if no chart
    pub fn layout_json(&self) -> String {
        self.current_layout()
            .and_then(|(_, layout)| serde_json::to_string(&layout).ok())
            .unwrap_or_default()
    }

    /// Render the current view as an HTML table chart
    ///
    /// # Returns
    /// HTML string, or empty string if no chart is loaded
    pub fn render_html(&self) -> String {
        let Some((chart, layout)) = self.current_layout() else {
            return String::new();
        };
        let mut renderer = HtmlTableRenderer::new().day_width(self.day_width);
        if self.dark_theme {
            renderer = renderer.dark_theme();
        }
        renderer.render(chart, &layout).unwrap_or_default()
    }

    /// Render the current view as SVG (for image export)
    pub fn render_svg(&self) -> String {
        let Some((chart, layout)) = self.current_layout() else {
            return String::new();
        };
        let mut renderer = SvgRenderer::new().day_width(self.day_width);
        if self.dark_theme {
            renderer = renderer.dark_theme();
        }
        renderer.render(chart, &layout).unwrap_or_default()
    }
}

impl ChartSession {
    fn load_internal(&mut self, chart_json: &str) -> Result<ChartSummary, String> {
        let chart = parse_chart(chart_json).map_err(|e| format!("Parse error: {}", e))?;
        self.window = Some(chart.default_window());
        self.chart = Some(chart);
        self.summary()
    }

    fn set_range_internal(&mut self, from: &str, to: &str) -> Result<ChartSummary, String> {
        let chart = self.chart.as_ref().ok_or("No chart loaded")?;
        self.window = Some(resolve_window(chart, Some(from), Some(to))?);
        self.summary()
    }

    fn set_today_internal(&mut self, today: &str) -> Result<ChartSummary, String> {
        self.today = match today.trim() {
            "" => None,
            value => Some(date_field("today", value)?),
        };
        self.summary()
    }

    fn summary(&self) -> Result<ChartSummary, String> {
        let (chart, window) = self.chart.as_ref().zip(self.window).ok_or("No chart loaded")?;
        Ok(ChartSummary {
            title: chart.title.clone(),
            global_start: format_date(chart.global_range.start()),
            global_end: format_date(chart.global_range.end()),
            visible_start: format_date(window.start()),
            visible_end: format_date(window.end()),
            types: chart.types.clone(),
            task_count: chart.tasks.len(),
            break_count: chart.breaks.len(),
            major_date_count: chart.major_dates.len(),
        })
    }

    fn current_layout(&self) -> Option<(&ChartData, Layout)> {
        let chart = self.chart.as_ref()?;
        let window = self.window?;
        let today = self.today.unwrap_or_else(|| SystemClock.today());
        let layout = TableLayoutEngine::new()
            .with_clock(FixedClock(today))
            .layout(chart, &window);
        Some((chart, layout))
    }

    fn respond(&mut self, result: Result<ChartSummary, String>) -> JsValue {
        let envelope = match result {
            Ok(data) => {
                self.last_error = None;
                SessionResult {
                    success: true,
                    error: None,
                    data: Some(data),
                }
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                SessionResult {
                    success: false,
                    error: Some(e),
                    data: None,
                }
            }
        };
        serde_wasm_bindgen::to_value(&envelope).unwrap_or(JsValue::NULL)
    }
}

impl Default for ChartSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: &str = r#"{
        "title": "Season",
        "global_start_date": "2024-03-01",
        "global_end_date": "2024-03-20",
        "types": ["Build"],
        "tasks": [
            { "name": "Frame", "start_date": "2024-03-01", "end_date": "2024-03-10", "important": true },
            { "name": "Wiring", "start_date": "2024-03-12", "end_date": "2024-03-15" }
        ],
        "breaks": [ { "start_date": "2024-03-04", "end_date": "2024-03-06" } ],
        "major_dates": [ { "date": "2024-03-15", "name": "Ship" } ]
    }"#;

    #[test]
    fn test_layout_chart_default_window() {
        let json = layout_chart_internal(CHART, None, None, Some("2024-03-07")).unwrap();
        let layout: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(layout["days"].as_array().unwrap().len(), 20);
        assert_eq!(layout["rows"][0]["name"], "Frame");
        assert_eq!(layout["rows"][0]["metrics"]["active_days"], 7);
        assert_eq!(layout["rows"][0]["metrics"]["due_offset_days"], 3);
    }

    #[test]
    fn test_layout_chart_custom_window() {
        let json =
            layout_chart_internal(CHART, Some("2024-03-11"), Some("2024-03-20"), Some("2024-03-07"))
                .unwrap();
        let layout: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(layout["rows"].as_array().unwrap().len(), 1);
        assert_eq!(layout["excluded"][0]["name"], "Frame");
    }

    #[test]
    fn test_layout_chart_errors() {
        let err = layout_chart_internal("{", None, None, None).unwrap_err();
        assert!(err.starts_with("Parse error"));

        let err = layout_chart_internal(CHART, Some("2024-03-31"), Some("2024-03-01"), None)
            .unwrap_err();
        assert!(err.contains("visible window"));

        let err = layout_chart_internal(CHART, None, None, Some("tomorrow")).unwrap_err();
        assert!(err.starts_with("Invalid today"));
    }

    #[test]
    fn test_render_html() {
        let html = render_html_internal(CHART, None, None, Some("2024-03-07"), 24).unwrap();
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("--day-width: 24px;"));
        assert!(html.contains("Ship</th>"));
    }

    #[test]
    fn test_session_load_and_range() {
        let mut session = ChartSession::new();
        assert!(!session.has_chart());
        assert_eq!(session.render_html(), "");
        assert_eq!(session.layout_json(), "");

        let summary = session.load_internal(CHART).unwrap();
        assert_eq!(summary.title, "Season");
        assert_eq!(summary.visible_start, "2024-03-01");
        assert_eq!(summary.visible_end, "2024-03-20");
        assert_eq!(summary.task_count, 2);
        assert!(session.has_chart());

        let summary = session.set_range_internal("2024-03-11", "2024-03-14").unwrap();
        assert_eq!(summary.visible_start, "2024-03-11");
        assert_eq!(summary.global_start, "2024-03-01");

        session.set_today_internal("2024-03-12").unwrap();
        let layout: serde_json::Value = serde_json::from_str(&session.layout_json()).unwrap();
        assert_eq!(layout["days"].as_array().unwrap().len(), 4);
        assert_eq!(layout["rows"][0]["placement"]["span_days"], 3);
        assert_eq!(layout["today"], "2024-03-12");
    }

    #[test]
    fn test_session_rejects_bad_input() {
        let mut session = ChartSession::new();
        assert_eq!(
            session.set_range_internal("2024-03-01", "2024-03-02").unwrap_err(),
            "No chart loaded"
        );

        session.load_internal(CHART).unwrap();
        assert!(session.set_range_internal("2024-03-09", "2024-03-01").is_err());
        // Failed range keeps the previous window
        assert_eq!(session.summary().unwrap().visible_end, "2024-03-20");

        assert!(session.set_today_internal("03/07/2024").is_err());
        assert!(session.set_today_internal("").is_ok());
    }

    #[test]
    fn test_session_zoom_and_theme() {
        let mut session = ChartSession::new();
        session.load_internal(CHART).unwrap();
        session.set_day_width(1);
        assert_eq!(session.day_width, 4);
        session.set_day_width(36);
        session.set_dark_theme(true);

        let html = session.render_html();
        assert!(html.contains("--day-width: 36px;"));
        assert!(html.contains("#1a1a2e"));

        let svg = session.render_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Wiring"));
    }
}
