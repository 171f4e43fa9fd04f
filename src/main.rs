//! CLI entry point for the grade reporter.
//!
//! Reads a student roster, writes a spreadsheet report of the grade
//! distribution, and draws a bar chart of it.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use grade_reporter::chart::{ChartRenderer, DEFAULT_CHART_PATH, SvgChart, TerminalChart};
use grade_reporter::output::{print_json, print_pretty};
use grade_reporter::pipeline::{PipelineConfig, RunOutcome, load_roster, run};
use grade_reporter::report::DEFAULT_REPORT_PATH;
use grade_reporter::stats::GradeStats;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "grade_reporter")]
#[command(about = "Analyze student grades and produce a spreadsheet report", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the xlsx report and render the chart
    Report {
        /// Roster spreadsheet (xlsx, xls, ods) or CSV file
        #[arg(short, long, default_value = "input.xlsx")]
        input: PathBuf,

        /// Report file to create; an existing file is never replaced
        #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
        output: PathBuf,

        /// How to show the chart
        #[arg(long, value_enum, default_value_t = ChartKind::Svg)]
        chart: ChartKind,

        /// Where the SVG chart is written
        #[arg(long, default_value = DEFAULT_CHART_PATH)]
        chart_output: PathBuf,

        /// Optional: also write a JSON summary to this path
        #[arg(long)]
        summary_json: Option<PathBuf>,

        /// Optional: append a line per run to this CSV file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Print grade statistics without writing a report
    Summary {
        #[arg(short, long, default_value = "input.xlsx")]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartKind {
    /// Bar chart image
    Svg,
    /// Text bars on stdout
    Terminal,
    /// No chart
    None,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/grade_reporter.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("grade_reporter.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    info!("The application is being launched");

    match cli.command {
        Commands::Report {
            input,
            output,
            chart,
            chart_output,
            summary_json,
            history,
        } => {
            let config = PipelineConfig {
                input,
                output,
                summary_json,
                history_csv: history,
            };

            let renderer: Option<Box<dyn ChartRenderer>> = match chart {
                ChartKind::Svg => Some(Box::new(SvgChart::new(chart_output))),
                ChartKind::Terminal => Some(Box::new(TerminalChart::stdout())),
                ChartKind::None => None,
            };

            match run(&config, renderer.as_deref())? {
                RunOutcome::Completed {
                    stats,
                    skipped_rows,
                    chart_rendered,
                } => {
                    info!(
                        output = %config.output.display(),
                        students = stats.total(),
                        skipped_rows,
                        chart_rendered,
                        "The results of the analysis are recorded in the output file"
                    );
                }
                RunOutcome::ReportSkipped { existing } => {
                    warn!(path = %existing.display(), "Report not written");
                }
            }
        }
        Commands::Summary { input } => {
            let roster = load_roster(&input)?;
            let stats = GradeStats::from_students(&roster.students);
            print_pretty(&stats);
            print_json(&stats)?;
        }
    }

    info!("The application is shutting down");
    Ok(())
}
