//! Summary output for grade statistics.
//!
//! Supports pretty-printing, a JSON summary document, and a CSV run history.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::stats::GradeStats;
use crate::student::Category;
use csv::WriterBuilder;
use std::fs::{self, OpenOptions};
use std::path::Path;

/// JSON summary of one run.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub skipped_rows: usize,
    pub stats: &'a GradeStats,
}

impl<'a> Summary<'a> {
    pub fn new(source: &Path, skipped_rows: usize, stats: &'a GradeStats) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.display().to_string(),
            skipped_rows,
            stats,
        }
    }
}

/// One line of the CSV run history.
#[derive(Debug, Serialize)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub total: usize,
    pub excellent: usize,
    pub good: usize,
    pub satisfactory: usize,
    pub failing: usize,
    pub max_grade: Option<f64>,
    pub average_grade: f64,
    pub skipped_rows: usize,
}

impl From<&Summary<'_>> for HistoryRecord {
    fn from(summary: &Summary<'_>) -> Self {
        let stats = summary.stats;
        HistoryRecord {
            timestamp: summary.generated_at,
            source: summary.source.clone(),
            total: stats.total(),
            excellent: stats.count(Category::Excellent),
            good: stats.count(Category::Good),
            satisfactory: stats.count(Category::Satisfactory),
            failing: stats.count(Category::Failing),
            max_grade: stats.max_grade(),
            average_grade: stats.average_grade(),
            skipped_rows: summary.skipped_rows,
        }
    }
}

/// Logs grade statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &GradeStats) {
    debug!("{:#?}", stats);
}

/// Logs grade statistics as pretty-printed JSON.
pub fn print_json(stats: &GradeStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Writes a [`Summary`] as pretty JSON, replacing any previous summary.
pub fn write_summary_json(path: &Path, summary: &Summary<'_>) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).with_context(|| format!("failed to write '{}'", path.display()))?;
    info!(path = %path.display(), "Summary written");
    Ok(())
}

/// Appends a [`HistoryRecord`] as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_history(path: &Path, record: &HistoryRecord) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending history record");

    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("failed to open '{}'", path.display()))?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(record)?;
    writer.flush()?;

    Ok(())
}
