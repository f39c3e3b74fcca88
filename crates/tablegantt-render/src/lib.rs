//! # tablegantt-render
//!
//! Rendering backends for computed chart layouts.
//!
//! This crate provides:
//! - Interactive HTML table chart rendering
//! - SVG chart rendering (static export)
//! - Text-based output
//!
//! Renderers only draw a [`Layout`]; all date arithmetic happens in the
//! layout engine. Pixel widths are applied here, so zooming never changes
//! the layout.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tablegantt_core::{LayoutEngine, Renderer};
//! use tablegantt_layout::TableLayoutEngine;
//! use tablegantt_render::{HtmlTableRenderer, SvgRenderer, TextRenderer};
//!
//! let layout = TableLayoutEngine::new().layout(&chart, &chart.default_window());
//!
//! // Interactive HTML table chart
//! let html = HtmlTableRenderer::new().day_width(24).render(&chart, &layout)?;
//!
//! // Pure SVG output
//! let svg = SvgRenderer::default().render(&chart, &layout)?;
//!
//! // Console view
//! let text = TextRenderer::default().render(&chart, &layout)?;
//! ```

pub mod html;

pub use html::{GanttTheme, HtmlTableRenderer};

use chrono::Datelike;
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;
use tablegantt_core::date::format_date;
use tablegantt_core::{ChartData, Layout, RenderError, Renderer, TaskRow};

/// SVG chart renderer configuration
#[derive(Clone, Debug)]
pub struct SvgRenderer {
    /// Width of one day column in pixels
    pub day_width: u32,
    /// Width of each metadata column in pixels
    pub meta_width: u32,
    /// Height per task row in pixels
    pub row_height: u32,
    /// Height of each of the two header rows in pixels
    pub header_row_height: u32,
    /// Height reserved for the title
    pub title_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Colours
    pub theme: GanttTheme,
    /// Font family
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            day_width: 20,
            meta_width: 80,
            row_height: 28,
            header_row_height: 24,
            title_height: 32,
            padding: 20,
            theme: GanttTheme::default(),
            font_family: "system-ui, -apple-system, sans-serif".into(),
            font_size: 12,
        }
    }
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure day column width
    pub fn day_width(mut self, width: u32) -> Self {
        self.day_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = GanttTheme::dark();
        self
    }

    /// Use a custom theme
    pub fn theme(mut self, theme: GanttTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Left edge of the day grid
    fn grid_left(&self) -> u32 {
        self.padding + 4 * self.meta_width
    }

    /// Top edge of the week header row
    fn header_top(&self) -> u32 {
        self.padding + self.title_height
    }

    /// Top edge of the first task row
    fn body_top(&self) -> u32 {
        self.header_top() + 2 * self.header_row_height
    }

    /// Calculate the total width of the SVG
    fn total_width(&self, day_count: usize) -> u32 {
        self.grid_left() + day_count as u32 * self.day_width + self.padding
    }

    /// Calculate the total height based on number of rows
    fn total_height(&self, row_count: usize) -> u32 {
        self.body_top() + row_count.max(1) as u32 * self.row_height + self.padding
    }

    /// Convert a column index to x position
    fn column_x(&self, index: usize) -> u32 {
        self.grid_left() + index as u32 * self.day_width
    }

    fn label(&self, content: impl Into<String>, x: u32, y: u32) -> Text {
        Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.theme.text_color.as_str())
    }

    /// Break shading and major-date highlighting behind the grid
    fn render_columns(&self, layout: &Layout, body_bottom: u32) -> Group {
        let mut group = Group::new().set("class", "columns");
        let top = self.header_top() + self.header_row_height;

        for day in &layout.days {
            let fill = if day.is_major {
                self.theme.major_color.as_str()
            } else if day.is_break {
                self.theme.break_color.as_str()
            } else {
                continue;
            };
            let column = Rectangle::new()
                .set("x", self.column_x(day.index))
                .set("y", top)
                .set("width", self.day_width)
                .set("height", body_bottom - top)
                .set("fill", fill)
                .set("class", if day.is_major { "major" } else { "break" });
            group = group.add(column);
        }

        group
    }

    /// Create the two header rows
    fn render_header(&self, layout: &Layout) -> Group {
        let mut group = Group::new().set("class", "header");
        let top = self.header_top();
        let day_top = top + self.header_row_height;
        let text_offset = self.header_row_height / 2 + self.font_size / 3;

        let header_bg = Rectangle::new()
            .set("x", self.padding)
            .set("y", top)
            .set("width", self.total_width(layout.total_days()) - 2 * self.padding)
            .set("height", self.header_row_height)
            .set("fill", self.theme.header_bg.as_str());
        group = group.add(header_bg);

        // Week groups, labelled with their Monday
        for week in &layout.weeks {
            let x = self.column_x(week.start_index);
            let divider = Line::new()
                .set("x1", x)
                .set("y1", top)
                .set("x2", x)
                .set("y2", day_top)
                .set("stroke", self.theme.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(divider);

            // Skip labels that would not fit a partial week
            if week.day_count * self.day_width as usize >= 4 * self.font_size as usize {
                group = group.add(self.label(format_date(week.monday), x + 4, top + text_offset));
            }
        }

        // Metadata headings
        for (col, heading) in ["Tasks", "Start", "End", "Days"].iter().enumerate() {
            let x = self.padding + col as u32 * self.meta_width + 4;
            group = group.add(
                self.label(*heading, x, day_top + text_offset)
                    .set("font-weight", "bold"),
            );
        }

        // Day numbers, replaced by the label on major dates
        for day in &layout.days {
            let x = self.column_x(day.index) + self.day_width / 2;
            let content = day
                .major_label
                .clone()
                .unwrap_or_else(|| day.date.day().to_string());
            let text = self
                .label(content, x, day_top + text_offset)
                .set("font-size", self.font_size - 2)
                .set("text-anchor", "middle");
            group = group.add(text);
        }

        group
    }

    /// Render grid lines
    fn render_grid(&self, layout: &Layout) -> Group {
        let mut group = Group::new().set("class", "grid");
        let left = self.padding;
        let right = self.column_x(layout.total_days());
        let top = self.header_top() + self.header_row_height;
        let bottom = self.body_top() + layout.rows.len().max(1) as u32 * self.row_height;

        // Horizontal lines: under the header, then under each row
        let mut y = top;
        while y <= bottom {
            let line = Line::new()
                .set("x1", left)
                .set("y1", y)
                .set("x2", right)
                .set("y2", y)
                .set("stroke", self.theme.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(line);
            y += if y < self.body_top() {
                self.header_row_height
            } else {
                self.row_height
            };
        }

        // Vertical lines for metadata columns and days
        let xs = (0..4)
            .map(|col| self.padding + col * self.meta_width)
            .chain((0..=layout.total_days()).map(|i| self.column_x(i)));
        for x in xs {
            let line = Line::new()
                .set("x1", x)
                .set("y1", top)
                .set("x2", x)
                .set("y2", bottom)
                .set("stroke", self.theme.grid_color.as_str())
                .set("stroke-width", 1);
            group = group.add(line);
        }

        group
    }

    /// Render a single task row
    fn render_task(&self, task: &TaskRow, row: usize) -> Group {
        let mut group = Group::new().set("class", "task");

        let y = self.body_top() + row as u32 * self.row_height;
        let text_y = y + self.row_height / 2 + self.font_size / 3;
        let meta_chars = (self.meta_width / 7) as usize;

        let mut name = self.label(truncate(&task.name, meta_chars), self.padding + 4, text_y);
        if task.important {
            name = name
                .set("fill", self.theme.important_color.as_str())
                .set("font-weight", "bold");
        }
        group = group.add(name);
        for (col, value) in [
            format_date(task.start),
            format_date(task.end),
            task.metrics.days_label(),
        ]
        .into_iter()
        .enumerate()
        {
            let x = self.padding + (col as u32 + 1) * self.meta_width + 4;
            group = group.add(self.label(value, x, text_y));
        }

        let bar_height = (self.row_height as f64 * 0.7) as u32;
        let bar_y = y + (self.row_height - bar_height) / 2;
        let bar_x = self.column_x(task.placement.leading_gap);
        let bar_width = task.placement.span_days as u32 * self.day_width;

        let mut bar = Rectangle::new()
            .set("x", bar_x)
            .set("y", bar_y)
            .set("width", bar_width)
            .set("height", bar_height)
            .set("rx", 3)
            .set("ry", 3)
            .set("fill", self.theme.bar_color(task.category));
        if task.important {
            bar = bar
                .set("stroke", self.theme.important_color.as_str())
                .set("stroke-width", 2);
        }
        group = group.add(bar);

        let bar_chars = (bar_width / 7) as usize;
        if bar_chars >= 2 {
            let text = self
                .label(truncate(&task.name, bar_chars), bar_x + 4, text_y)
                .set("fill", self.theme.bar_text_color.as_str());
            group = group.add(text);
        }

        group
    }

    /// Vertical marker through the today column
    fn render_today(&self, index: usize, bottom: u32) -> Line {
        let x = self.column_x(index) + self.day_width / 2;
        Line::new()
            .set("class", "today")
            .set("x1", x)
            .set("y1", self.header_top() + self.header_row_height)
            .set("x2", x)
            .set("y2", bottom)
            .set("stroke", self.theme.today_color.as_str())
            .set("stroke-width", 2)
            .set("stroke-dasharray", "6,4")
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, chart: &ChartData, layout: &Layout) -> Result<String, RenderError> {
        check_layout(layout)?;

        let width = self.total_width(layout.total_days());
        let height = self.total_height(layout.rows.len());
        let body_bottom = height - self.padding;

        // Create document
        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height))
            .set("xmlns", "http://www.w3.org/2000/svg");

        // Background
        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", self.theme.background_color.as_str());
        document = document.add(background);

        // Title
        let title = self
            .label(chart.title.as_str(), self.padding, self.padding + 16)
            .set("font-size", self.font_size + 4)
            .set("font-weight", "bold");
        document = document.add(title);

        document = document.add(self.render_columns(layout, body_bottom));
        document = document.add(self.render_grid(layout));
        document = document.add(self.render_header(layout));

        if layout.rows.is_empty() {
            let text_y = self.body_top() + self.row_height / 2 + self.font_size / 3;
            document = document.add(self.label("No tasks in the selected range", self.padding + 4, text_y));
        }
        for (row, task) in layout.rows.iter().enumerate() {
            document = document.add(self.render_task(task, row));
        }

        if let Some(index) = layout.today_index() {
            document = document.add(self.render_today(index, body_bottom));
        }

        // Convert to string
        let mut output = Vec::new();
        svg::write(&mut output, &document)
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

/// Plain text renderer for console output
///
/// One line per row: metadata, then a bar over the visible days where `#`
/// marks task days, `~` break days and `.` other days.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    /// Width of the task name column in characters
    pub name_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { name_width: 20 }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the task name column width
    pub fn name_width(mut self, width: usize) -> Self {
        self.name_width = width.max(4);
        self
    }

    fn bar(layout: &Layout, task: &TaskRow) -> String {
        let placement = task.placement;
        layout
            .days
            .iter()
            .map(|day| {
                if (placement.leading_gap..placement.end_index()).contains(&day.index) {
                    '#'
                } else if day.is_break {
                    '~'
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, chart: &ChartData, layout: &Layout) -> Result<String, RenderError> {
        check_layout(layout)?;

        let mut out = format!("Chart: {}\n", chart.title);
        let today = if layout.today_index().is_some() {
            format_date(layout.today)
        } else {
            format!("{} (outside window)", format_date(layout.today))
        };
        out.push_str(&format!(
            "Window: {} to {} ({} days), today {}\n",
            format_date(layout.window.start()),
            format_date(layout.window.end()),
            layout.total_days(),
            today
        ));

        for day in layout.days.iter().filter(|d| d.is_major) {
            out.push_str(&format!(
                "Major: {} {}\n",
                format_date(day.date),
                day.major_label.as_deref().unwrap_or_default()
            ));
        }
        out.push('\n');

        if layout.rows.is_empty() {
            out.push_str("No tasks in the selected range\n");
        }
        for task in &layout.rows {
            let flag = if task.important { '!' } else { ' ' };
            out.push_str(&format!(
                "{}{:<width$} {} {} {:<8} |{}| {}\n",
                flag,
                truncate(&task.name, self.name_width),
                format_date(task.start),
                format_date(task.end),
                task.metrics.days_label(),
                Self::bar(layout, task),
                task.metrics.due_status(),
                width = self.name_width,
            ));
        }

        match layout.excluded.len() {
            0 => {}
            1 => out.push_str("\n1 task outside the selected range\n"),
            n => out.push_str(&format!("\n{} tasks outside the selected range\n", n)),
        }

        Ok(out)
    }
}

/// Reject layouts whose rows do not fit their own day grid
pub(crate) fn check_layout(layout: &Layout) -> Result<(), RenderError> {
    let total = layout.total_days();
    if total == 0 {
        return Err(RenderError::InvalidData("Layout has no visible days".into()));
    }
    if let Some(row) = layout
        .rows
        .iter()
        .find(|row| row.placement.total_columns() != total)
    {
        return Err(RenderError::InvalidData(format!(
            "Row {:?} spans {} columns but the window has {} days",
            row.name,
            row.placement.total_columns(),
            total
        )));
    }
    Ok(())
}

/// Truncate a string with ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    }
}
