//! Interactive HTML Table Chart Renderer
//!
//! Generates standalone HTML files with the chart laid out as a table.
//! Features:
//! - Two-tier sticky header (week groups, then day cells)
//! - Four fixed metadata columns (Tasks, Start, End, Days)
//! - Break, major-date and today column highlighting
//! - Task bars spanning their visible days, coloured by category
//! - Hover tooltips with task details and due status
//! - Zoom slider scaling the day width

use tablegantt_core::{color_index, ChartData, DayColumn, Layout, RenderError, Renderer, TaskRow};
use tablegantt_core::{date::format_date, DEFAULT_PALETTE};

/// HTML table chart renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlTableRenderer {
    /// Width of one day column in pixels
    pub day_width: u32,
    /// Width of each metadata column in pixels
    pub meta_width: u32,
    /// Theme (light or dark)
    pub theme: GanttTheme,
    /// Enable interactivity (tooltips, zoom slider)
    pub interactive: bool,
}

/// Colours shared by the HTML and SVG renderers
#[derive(Clone, Debug)]
pub struct GanttTheme {
    /// Task bar colours, indexed by category modulo length
    pub palette: Vec<String>,
    pub background_color: String,
    pub grid_color: String,
    pub text_color: String,
    pub header_bg: String,
    pub break_color: String,
    pub major_color: String,
    pub today_color: String,
    pub important_color: String,
    pub bar_text_color: String,
}

impl Default for GanttTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl GanttTheme {
    pub fn light() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            background_color: "#ffffff".into(),
            grid_color: "#dddddd".into(),
            text_color: "#2c3e50".into(),
            header_bg: "#f8f9fa".into(),
            break_color: "#d9d9d9".into(),
            major_color: "#ffe08a".into(),
            today_color: "#43a047".into(),
            important_color: "#c0392b".into(),
            bar_text_color: "#ffffff".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
            background_color: "#1a1a2e".into(),
            grid_color: "#2d2d44".into(),
            text_color: "#eaeaea".into(),
            header_bg: "#16213e".into(),
            break_color: "#3a3a55".into(),
            major_color: "#8a6d1f".into(),
            today_color: "#43a047".into(),
            important_color: "#f39c12".into(),
            bar_text_color: "#ffffff".into(),
        }
    }

    /// Replace the task bar palette
    pub fn with_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Bar colour for a task category
    pub fn bar_color(&self, category: i64) -> &str {
        self.palette
            .get(color_index(category, self.palette.len()))
            .map_or(self.text_color.as_str(), String::as_str)
    }
}

impl Default for HtmlTableRenderer {
    fn default() -> Self {
        Self {
            day_width: 20,
            meta_width: 80,
            theme: GanttTheme::default(),
            interactive: true,
        }
    }
}

impl HtmlTableRenderer {
    pub fn new() -> Self {
        Self::default()
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

    /// Configure the initial day column width
    pub fn day_width(mut self, width: u32) -> Self {
        self.day_width = width;
        self
    }

    /// Configure the metadata column width
    pub fn meta_width(mut self, width: u32) -> Self {
        self.meta_width = width;
        self
    }

    /// Disable interactivity
    pub fn static_chart(mut self) -> Self {
        self.interactive = false;
        self
    }

    fn generate_html(&self, chart: &ChartData, layout: &Layout) -> String {
        let css = self.generate_css();
        let controls = if self.interactive {
            format!(
                r#"            <div class="gantt-controls">
                <label for="zoom">Zoom</label>
                <input type="range" id="zoom" min="8" max="60" value="{day_width}">
                <span id="zoom-value">{day_width}px</span>
            </div>
"#,
                day_width = self.day_width,
            )
        } else {
            String::new()
        };
        let script = if self.interactive {
            format!("    <script>\n{}\n    </script>\n", self.generate_js())
        } else {
            String::new()
        };
        let note = match layout.excluded.len() {
            0 => String::new(),
            1 => "        <p class=\"gantt-note\">1 task outside the selected range</p>\n".into(),
            n => format!(
                "        <p class=\"gantt-note\">{} tasks outside the selected range</p>\n",
                n
            ),
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Gantt Chart</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="gantt-container">
        <div class="gantt-header">
            <h1 id="chartTitle">{title}</h1>
            <span class="gantt-range">{from} to {to}</span>
{controls}        </div>
        <div class="gantt-wrapper">
            <table class="gantt-table">
                <thead>
{week_row}{day_row}                </thead>
                <tbody>
{body}                </tbody>
            </table>
        </div>
{note}        <div id="tooltip" class="tooltip"></div>
    </div>
{script}</body>
</html>"#,
            title = html_escape(&chart.title),
            css = css,
            from = format_date(layout.window.start()),
            to = format_date(layout.window.end()),
            controls = controls,
            week_row = self.render_week_row(layout),
            day_row = self.render_day_row(layout),
            body = self.render_body(layout),
            note = note,
            script = script,
        )
    }

    /// First header row: blank fixed cells, then one cell per week group
    fn render_week_row(&self, layout: &Layout) -> String {
        let mut row = String::from("                    <tr class=\"weekGroup\">\n");
        for col in 0..4 {
            row.push_str(&format!(
                "                        <th class=\"fixed col-{}\"></th>\n",
                col
            ));
        }
        for week in &layout.weeks {
            row.push_str(&format!(
                "                        <th class=\"weekCell\" colspan=\"{}\">{}</th>\n",
                week.day_count,
                format_date(week.monday)
            ));
        }
        row.push_str("                    </tr>\n");
        row
    }

    /// Second header row: metadata headings, then one cell per visible day
    fn render_day_row(&self, layout: &Layout) -> String {
        let mut row = String::from("                    <tr class=\"dayHeader\">\n");
        for (col, heading) in ["Tasks", "Start", "End", "Days"].iter().enumerate() {
            row.push_str(&format!(
                "                        <th class=\"fixed col-{}\">{}</th>\n",
                col, heading
            ));
        }
        for day in &layout.days {
            let label = day.major_label.as_deref().map(html_escape).unwrap_or_default();
            row.push_str(&format!(
                "                        <th class=\"{}\" title=\"{}\">{}</th>\n",
                day_classes(day),
                format_date(day.date),
                label
            ));
        }
        row.push_str("                    </tr>\n");
        row
    }

    fn render_body(&self, layout: &Layout) -> String {
        if layout.rows.is_empty() {
            return format!(
                "                    <tr><td class=\"empty\" colspan=\"{}\">No tasks in the selected range</td></tr>\n",
                4 + layout.total_days()
            );
        }

        layout
            .rows
            .iter()
            .map(|row| self.render_task_row(row, layout))
            .collect()
    }

    /// Render a single task row
    fn render_task_row(&self, row: &TaskRow, layout: &Layout) -> String {
        let name = html_escape(&row.name);
        let important = if row.important { " important" } else { "" };

        let mut out = String::from("                    <tr>\n");
        out.push_str(&format!(
            "                        <td class=\"fixed col-0{}\">{}</td>\n",
            important, name
        ));
        out.push_str(&format!(
            "                        <td class=\"fixed col-1\">{}</td>\n",
            format_date(row.start)
        ));
        out.push_str(&format!(
            "                        <td class=\"fixed col-2\">{}</td>\n",
            format_date(row.end)
        ));
        out.push_str(&format!(
            "                        <td class=\"fixed col-3\">{}</td>\n",
            row.metrics.days_label()
        ));

        let placement = row.placement;
        for day in &layout.days[..placement.leading_gap] {
            out.push_str(&format!(
                "                        <td class=\"{}\"></td>\n",
                day_classes(day)
            ));
        }

        let tooltip = if self.interactive {
            format!(" data-tooltip=\"{}\"", html_escape(&tooltip_html(row)))
        } else {
            format!(" title=\"{}\"", html_escape(&tooltip_text(row)))
        };
        out.push_str(&format!(
            "                        <td class=\"dayCell taskBar{}\" colspan=\"{}\" style=\"background: {}\"{}>{}</td>\n",
            important,
            placement.span_days,
            self.theme.bar_color(row.category),
            tooltip,
            name
        ));

        for day in &layout.days[placement.end_index()..] {
            out.push_str(&format!(
                "                        <td class=\"{}\"></td>\n",
                day_classes(day)
            ));
        }

        out.push_str("                    </tr>\n");
        out
    }

    fn generate_css(&self) -> String {
        format!(
            r#"        :root {{
            --day-width: {day_width}px;
            --meta-width: {meta_width}px;
            --bg-color: {bg};
            --text-color: {text};
            --grid-color: {grid};
            --header-bg: {header_bg};
            --break-color: {break_color};
            --major-color: {major};
            --today-color: {today};
            --important-color: {important};
            --bar-text-color: {bar_text};
        }}
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-color);
            color: var(--text-color);
            padding: 20px;
        }}
        .gantt-header {{
            display: flex;
            align-items: center;
            gap: 16px;
            margin-bottom: 16px;
        }}
        .gantt-header h1 {{
            font-size: 1.5rem;
            font-weight: 600;
        }}
        .gantt-range {{
            opacity: 0.7;
        }}
        .gantt-controls {{
            display: flex;
            align-items: center;
            gap: 8px;
            margin-left: auto;
            font-size: 13px;
        }}
        .gantt-wrapper {{
            overflow: auto;
            max-height: 85vh;
            border: 1px solid var(--grid-color);
            border-radius: 8px;
        }}
        .gantt-table {{
            border-collapse: separate;
            border-spacing: 0;
            table-layout: fixed;
            font-size: 12px;
        }}
        .gantt-table th, .gantt-table td {{
            border-right: 1px solid var(--grid-color);
            border-bottom: 1px solid var(--grid-color);
            height: 28px;
            white-space: nowrap;
            overflow: hidden;
            text-overflow: ellipsis;
        }}
        .gantt-table thead th {{
            position: sticky;
            background: var(--header-bg);
            z-index: 2;
        }}
        .weekGroup th {{ top: 0; }}
        .dayHeader th {{ top: 28px; }}
        .weekCell {{
            text-align: left;
            padding-left: 4px;
        }}
        .fixed {{
            position: sticky;
            min-width: var(--meta-width);
            width: var(--meta-width);
            max-width: var(--meta-width);
            background: var(--bg-color);
            padding: 0 4px;
            z-index: 1;
        }}
        thead .fixed {{ z-index: 3; }}
        .col-0 {{ left: 0; }}
        .col-1 {{ left: var(--meta-width); }}
        .col-2 {{ left: calc(var(--meta-width) * 2); }}
        .col-3 {{ left: calc(var(--meta-width) * 3); }}
        .dayCell {{
            min-width: var(--day-width);
            width: var(--day-width);
            max-width: var(--day-width);
        }}
        .breakCell {{ background: var(--break-color); }}
        .majorDateCell {{
            background: var(--major-color);
            overflow: visible;
            z-index: 10;
        }}
        .todayCell {{ box-shadow: inset 2px 0 0 var(--today-color); }}
        .taskBar {{
            max-width: none;
            color: var(--bar-text-color);
            padding: 0 4px;
            border-radius: 4px;
            cursor: default;
        }}
        .taskBar.important {{ box-shadow: inset 0 0 0 2px var(--important-color); }}
        .fixed.important {{
            color: var(--important-color);
            font-weight: 600;
        }}
        .empty {{
            padding: 12px;
            text-align: center;
            opacity: 0.7;
        }}
        .gantt-note {{
            margin-top: 12px;
            font-size: 13px;
            opacity: 0.7;
        }}
        .tooltip {{
            position: absolute;
            background: rgba(0,0,0,0.9);
            color: white;
            padding: 12px;
            border-radius: 6px;
            font-size: 13px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.2s;
            z-index: 1000;
            max-width: 300px;
        }}
        .tooltip.visible {{
            opacity: 1;
        }}
        .tooltip .task-name {{
            font-weight: 600;
            margin-bottom: 8px;
        }}
        .tooltip .overdue {{ color: #e74c3c; }}"#,
            day_width = self.day_width,
            meta_width = self.meta_width,
            bg = self.theme.background_color,
            text = self.theme.text_color,
            grid = self.theme.grid_color,
            header_bg = self.theme.header_bg,
            break_color = self.theme.break_color,
            major = self.theme.major_color,
            today = self.theme.today_color,
            important = self.theme.important_color,
            bar_text = self.theme.bar_text_color,
        )
    }

    /// Generate JavaScript for interactivity
    fn generate_js(&self) -> String {
        r#"        // Zoom functionality
        const zoom = document.getElementById('zoom');
        const zoomValue = document.getElementById('zoom-value');

        zoom.addEventListener('input', () => {
            document.documentElement.style.setProperty('--day-width', `${zoom.value}px`);
            zoomValue.textContent = `${zoom.value}px`;
        });

        // Tooltip functionality
        const tooltip = document.getElementById('tooltip');

        document.querySelectorAll('.taskBar').forEach(bar => {
            bar.addEventListener('mouseenter', () => {
                tooltip.innerHTML = bar.dataset.tooltip;
                tooltip.classList.add('visible');
            });

            bar.addEventListener('mousemove', (e) => {
                tooltip.style.left = (e.pageX + 10) + 'px';
                tooltip.style.top = (e.pageY + 10) + 'px';
            });

            bar.addEventListener('mouseleave', () => {
                tooltip.classList.remove('visible');
            });
        });"#
            .to_string()
    }
}

impl Renderer for HtmlTableRenderer {
    type Output = String;

    fn render(&self, chart: &ChartData, layout: &Layout) -> Result<String, RenderError> {
        crate::check_layout(layout)?;
        Ok(self.generate_html(chart, layout))
    }
}

/// CSS classes for a day cell
fn day_classes(day: &DayColumn) -> String {
    let mut classes = String::from("dayCell");
    if day.is_break {
        classes.push_str(" breakCell");
    }
    if day.is_major {
        classes.push_str(" majorDateCell");
    }
    if day.is_today {
        classes.push_str(" todayCell");
    }
    classes
}

/// Label shown for a task's category
fn type_text(row: &TaskRow) -> String {
    row.type_label
        .clone()
        .unwrap_or_else(|| format!("#{}", row.category))
}

/// Tooltip markup, shown by the hover script
fn tooltip_html(row: &TaskRow) -> String {
    let status = row.metrics.due_status();
    let status_class = if row.metrics.due_offset_days < 0 {
        "overdue"
    } else {
        "due"
    };
    format!(
        r#"<div class="task-name">{name}</div><div>Start: {start}</div><div>End: {end}</div><div>Type: {kind}</div><div>High Priority: {priority}</div><div>Days: {days}</div><div class="{status_class}">{status}</div>"#,
        name = html_escape(&row.name),
        start = format_date(row.start),
        end = format_date(row.end),
        kind = html_escape(&type_text(row)),
        priority = if row.important { "Yes" } else { "No" },
        days = row.metrics.days_label(),
        status_class = status_class,
        status = status,
    )
}

/// Plain tooltip for static charts
fn tooltip_text(row: &TaskRow) -> String {
    format!(
        "{}\nStart: {}\nEnd: {}\nType: {}\nHigh Priority: {}\nDays: {}\n{}",
        row.name,
        format_date(row.start),
        format_date(row.end),
        type_text(row),
        if row.important { "Yes" } else { "No" },
        row.metrics.days_label(),
        row.metrics.due_status()
    )
}

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
