//! Rendering of laid-out charts, from chart JSON to output

use chrono::NaiveDate;
use tablegantt_core::{ChartData, Layout, LayoutEngine, Renderer, VisibleWindow};
use tablegantt_layout::{FixedClock, TableLayoutEngine};
use tablegantt_parser::parse_chart;
use tablegantt_render::{GanttTheme, HtmlTableRenderer, SvgRenderer, TextRenderer};

const CHART: &str = r#"{
    "title": "Robot Build",
    "global_start_date": "2024-03-01",
    "global_end_date": "2024-03-20",
    "types": ["Mechanical", "Software"],
    "tasks": [
        { "name": "Chassis", "start_date": "2024-03-01", "end_date": "2024-03-10", "type": 0, "important": true },
        { "name": "Firmware", "start_date": "2024-03-05", "end_date": "2024-03-08", "type": 1 },
        { "name": "Paint", "start_date": "2024-03-18", "end_date": "2024-03-20", "type": 6 }
    ],
    "breaks": [ { "start_date": "2024-03-04", "end_date": "2024-03-06" } ],
    "major_dates": [ { "date": "2024-03-08", "name": "Demo" } ]
}"#;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn laid_out(window: Option<(NaiveDate, NaiveDate)>) -> (ChartData, Layout) {
    let chart = parse_chart(CHART).unwrap();
    let window = match window {
        Some((from, to)) => VisibleWindow::new(from, to).unwrap(),
        None => chart.default_window(),
    };
    let layout = TableLayoutEngine::new()
        .with_clock(FixedClock(date(2024, 3, 7)))
        .layout(&chart, &window);
    (chart, layout)
}

#[test]
fn html_rows_follow_end_date_order() {
    let (chart, layout) = laid_out(None);
    let html = HtmlTableRenderer::new().render(&chart, &layout).unwrap();

    let firmware = html.find(">Firmware</td>").unwrap();
    let chassis = html.find(">Chassis</td>").unwrap();
    let paint = html.find(">Paint</td>").unwrap();
    assert!(firmware < chassis && chassis < paint);
}

#[test]
fn html_every_row_fills_the_grid() {
    let (chart, layout) = laid_out(None);
    let html = HtmlTableRenderer::new().render(&chart, &layout).unwrap();

    // Chassis: no leading cells, a 10-day bar, 10 trailing cells
    assert!(html.contains(r#"colspan="10" style="background: #fb6262""#));
    // Paint wraps type 6 into the third palette slot
    assert!(html.contains(r#"colspan="3" style="background: #dada8a""#));
    assert!(html.contains(r#"<th class="weekCell" colspan="3">2024-02-26</th>"#));
    assert!(html.contains(r#"<th class="weekCell" colspan="7">2024-03-04</th>"#));
    assert!(html.contains(">10 (7)</td>"));
    assert!(html.contains("Demo</th>"));
}

#[test]
fn html_tooltip_reports_type_and_due_status() {
    let (chart, layout) = laid_out(None);
    let html = HtmlTableRenderer::new().render(&chart, &layout).unwrap();

    assert!(html.contains("Type: Software"));
    assert!(html.contains("1 day left"));
    assert!(html.contains("Type: #6"));
}

#[test]
fn narrowed_window_drops_rows() {
    let (chart, layout) = laid_out(Some((date(2024, 3, 9), date(2024, 3, 12))));
    assert_eq!(layout.rows.len(), 1);

    let html = HtmlTableRenderer::new().render(&chart, &layout).unwrap();
    assert!(html.contains(">Chassis</td>"));
    assert!(!html.contains(">Firmware</td>"));
    assert!(html.contains("2 tasks outside the selected range"));
}

#[test]
fn custom_palette_reaches_bars() {
    let (chart, layout) = laid_out(None);
    let theme = GanttTheme::dark().with_palette(["#123456"]);
    let html = HtmlTableRenderer::new().theme(theme).render(&chart, &layout).unwrap();
    assert!(html.contains("background: #123456"));
    assert!(!html.contains("background: #fb6262"));
}

#[test]
fn svg_and_text_agree_on_rows() {
    let (chart, layout) = laid_out(None);

    let svg = SvgRenderer::new().render(&chart, &layout).unwrap();
    let text = TextRenderer::new().render(&chart, &layout).unwrap();

    for name in ["Chassis", "Firmware", "Paint"] {
        assert!(svg.contains(name));
        assert!(text.contains(name));
    }
    assert!(text.contains("|##########..........| 3 days left"));
    assert!(text.contains("|...~####............| 1 day left"));
}

#[test]
fn empty_window_still_renders() {
    let (chart, layout) = laid_out(Some((date(2025, 1, 1), date(2025, 1, 7))));
    assert!(layout.is_empty());

    let html = HtmlTableRenderer::new().render(&chart, &layout).unwrap();
    assert!(html.contains("No tasks in the selected range"));
    let svg = SvgRenderer::new().render(&chart, &layout).unwrap();
    assert!(svg.contains("No tasks in the selected range"));
}
