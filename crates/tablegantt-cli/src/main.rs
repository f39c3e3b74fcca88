//! tablegantt CLI - Table Gantt Chart Layout Engine
//!
//! Command-line interface for checking, laying out and rendering chart files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tablegantt_core::date::{format_date, parse_date};
use tablegantt_core::{ChartData, Layout, LayoutEngine, Renderer, VisibleWindow};
use tablegantt_layout::{Clock, FixedClock, SystemClock, TableLayoutEngine};
use tablegantt_render::{HtmlTableRenderer, SvgRenderer, TextRenderer};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tablegantt")]
#[command(author, version, about = "Table-based Gantt chart layout engine", long_about = None)]
struct Cli {
    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Visible window and "today" shared by layout and render
#[derive(clap::Args, Debug)]
struct WindowArgs {
    /// First visible day (defaults to the chart's global start)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = date_arg)]
    from: Option<NaiveDate>,

    /// Last visible day (defaults to the chart's global end)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = date_arg)]
    to: Option<NaiveDate>,

    /// Date used for the today marker and due offsets (defaults to the local date)
    #[arg(long, value_name = "YYYY-MM-DD", env = "TABLEGANTT_TODAY", value_parser = date_arg)]
    today: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a chart file
    Check {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Compute the layout of a chart
    Layout {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = LayoutFormat::Json)]
        format: LayoutFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a chart to HTML or SVG
    Render {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        /// Output format (inferred from the output extension if omitted)
        #[arg(short, long, value_enum)]
        format: Option<RenderFormat>,

        /// Width of one day column in pixels
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(4..=200))]
        day_width: u32,

        /// Use the dark theme
        #[arg(long)]
        dark: bool,

        /// Omit tooltips script and zoom control (HTML only)
        #[arg(long = "static")]
        static_chart: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RenderFormat {
    Html,
    Svg,
}

impl RenderFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Self::Svg,
            _ => Self::Html,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; RUST_LOG overrides -v
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Check { file }) => cmd_check(&file),
        Some(Commands::Layout {
            file,
            window,
            format,
            output,
        }) => cmd_layout(&file, &window, format, output.as_deref()),
        Some(Commands::Render {
            file,
            output,
            window,
            format,
            day_width,
            dark,
            static_chart,
        }) => {
            let format = format.unwrap_or_else(|| RenderFormat::from_path(&output));
            let options = RenderOptions {
                format,
                day_width,
                dark,
                static_chart,
            };
            cmd_render(&file, &output, &window, &options)
        }
        None => {
            println!("tablegantt - Table Gantt Chart Layout Engine");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

fn cmd_check(file: &Path) -> Result<()> {
    let chart = load_chart(file)?;

    println!("✓ {}: {}", file.display(), chart.title);
    println!(
        "  Range: {} to {} ({} days)",
        format_date(chart.global_range.start()),
        format_date(chart.global_range.end()),
        chart.global_range.days()
    );
    println!("  Types: {}", chart.types.len());
    println!("  Tasks: {}", chart.tasks.len());
    println!("  Breaks: {}", chart.breaks.len());
    println!("  Major dates: {}", chart.major_dates.len());
    Ok(())
}

fn cmd_layout(
    file: &Path,
    window: &WindowArgs,
    format: LayoutFormat,
    output: Option<&Path>,
) -> Result<()> {
    let chart = load_chart(file)?;
    let layout = compute(&chart, window)?;

    let content = match format {
        LayoutFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?;
            json.push('\n');
            json
        }
        LayoutFormat::Text => TextRenderer::new()
            .render(&chart, &layout)
            .context("Failed to render layout")?,
    };

    write_output(output, &content)
}

struct RenderOptions {
    format: RenderFormat,
    day_width: u32,
    dark: bool,
    static_chart: bool,
}

fn cmd_render(
    file: &Path,
    output: &Path,
    window: &WindowArgs,
    options: &RenderOptions,
) -> Result<()> {
    let chart = load_chart(file)?;
    let layout = compute(&chart, window)?;

    let content = match options.format {
        RenderFormat::Html => {
            let mut renderer = HtmlTableRenderer::new().day_width(options.day_width);
            if options.dark {
                renderer = renderer.dark_theme();
            }
            if options.static_chart {
                renderer = renderer.static_chart();
            }
            renderer.render(&chart, &layout)
        }
        RenderFormat::Svg => {
            let mut renderer = SvgRenderer::new().day_width(options.day_width);
            if options.dark {
                renderer = renderer.dark_theme();
            }
            renderer.render(&chart, &layout)
        }
    }
    .context("Failed to render chart")?;

    write_output(Some(output), &content)?;
    info!(output = %output.display(), rows = layout.rows.len(), "Rendered chart");
    eprintln!("Wrote {}", output.display());
    Ok(())
}

fn load_chart(file: &Path) -> Result<ChartData> {
    let chart = tablegantt_parser::parse_file(file)
        .with_context(|| format!("Failed to load chart {}", file.display()))?;
    debug!(title = %chart.title, tasks = chart.tasks.len(), "Loaded chart");
    Ok(chart)
}

/// Resolve the window against the chart and run the layout engine
fn compute(chart: &ChartData, args: &WindowArgs) -> Result<Layout> {
    let from = args.from.unwrap_or_else(|| chart.global_range.start());
    let to = args.to.unwrap_or_else(|| chart.global_range.end());
    let window = VisibleWindow::new(from, to).context("Invalid --from/--to range")?;

    let today = args.today.unwrap_or_else(|| SystemClock.today());
    let engine = TableLayoutEngine::new().with_clock(FixedClock(today));
    Ok(engine.layout(chart, &window))
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}
