use super::cell::Row;
use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that make a source unusable as a whole.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no sheet found in '{}'", .0.display())]
    MissingSheet(PathBuf),
}

/// A single-sheet tabular data source.
///
/// Implementations return every row of the sheet in order, each tagged with
/// its absolute zero-based index so callers can recognise the header row.
pub trait TabularReader {
    fn rows(&mut self) -> Result<Vec<Row>>;
}
