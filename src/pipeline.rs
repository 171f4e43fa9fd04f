//! End-to-end run: read the roster, aggregate, write the report, then show
//! the chart.

use crate::chart::{ChartData, ChartRenderer, present};
use crate::ingest::{Ingested, ingest};
use crate::output::{HistoryRecord, Summary, append_history, write_summary_json};
use crate::report::{WriteOutcome, write_report};
use crate::source::open_source;
use crate::stats::GradeStats;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub summary_json: Option<PathBuf>,
    pub history_csv: Option<PathBuf>,
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        stats: GradeStats,
        skipped_rows: usize,
        chart_rendered: bool,
    },
    /// The output file already existed, so nothing was written or shown.
    ReportSkipped { existing: PathBuf },
}

/// Reads and validates the roster at `input`.
///
/// Opening the file or finding no sheet in it is fatal; bad rows are not.
#[tracing::instrument(skip(input), fields(input = %input.display()))]
pub fn load_roster(input: &Path) -> Result<Ingested> {
    let mut source =
        open_source(input).inspect_err(|e| error!(error = %e, "Failed to open input"))?;
    let rows = source
        .rows()
        .inspect_err(|e| error!(error = %e, "Failed to read input"))?;

    let ingested = ingest(&rows);
    if !ingested.skipped.is_empty() {
        warn!(skipped = ingested.skipped.len(), "Some rows were skipped");
    }
    info!(students = ingested.students.len(), "Roster loaded");

    Ok(ingested)
}

/// Runs the whole pipeline. The chart, if a renderer is given, is presented
/// only after the report is written. Once the report exists, failures of the
/// summary file, the history file, or the chart are logged and do not fail
/// the run.
#[tracing::instrument(
    skip_all,
    fields(input = %config.input.display(), output = %config.output.display())
)]
pub fn run(config: &PipelineConfig, renderer: Option<&dyn ChartRenderer>) -> Result<RunOutcome> {
    let Ingested { students, skipped } = load_roster(&config.input)?;

    info!("Starting grade analysis");
    let stats = GradeStats::from_students(&students);
    info!(
        total = stats.total(),
        max_grade = ?stats.max_grade(),
        average_grade = stats.average_grade(),
        "Analysis complete"
    );

    let written = match write_report(&config.output, &stats)
        .with_context(|| format!("error writing report '{}'", config.output.display()))?
    {
        WriteOutcome::Written(written) => written,
        WriteOutcome::AlreadyExists(existing) => {
            return Ok(RunOutcome::ReportSkipped { existing });
        }
    };

    let summary = Summary::new(&config.input, skipped.len(), &stats);
    if let Some(path) = &config.summary_json {
        if let Err(e) = write_summary_json(path, &summary) {
            error!(path = %path.display(), error = %e, "Failed to write summary");
        }
    }
    if let Some(path) = &config.history_csv {
        if let Err(e) = append_history(path, &HistoryRecord::from(&summary)) {
            error!(path = %path.display(), error = %e, "Failed to append run history");
        }
    }

    let chart_rendered =
        renderer.is_some_and(|r| present(&written, &ChartData::from(&stats), r));

    Ok(RunOutcome::Completed {
        stats,
        skipped_rows: skipped.len(),
        chart_rendered,
    })
}
