//! Comma-separated roster reader.

use super::cell::{Cell, Row};
use super::reader::TabularReader;
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Reads a roster from CSV text. Fields that parse as numbers are typed as
/// [`Cell::Number`]; everything else non-empty is [`Cell::Text`].
pub struct CsvSource {
    path: PathBuf,
    reader: csv::Reader<File>,
}

impl CsvSource {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .has_headers(false) // header is row 0, handled by ingestion
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("failed to open CSV '{}'", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            reader,
        })
    }
}

impl TabularReader for CsvSource {
    fn rows(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();

        for (index, record) in self.reader.records().enumerate() {
            let record = record.with_context(|| {
                format!("failed to read row {index} of '{}'", self.path.display())
            })?;
            let cells = record.iter().map(parse_field).collect();
            rows.push(Row::new(index, cells));
        }

        Ok(rows)
    }
}

fn parse_field(field: &str) -> Cell {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }

    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Cell::Number(n),
        _ => Cell::Text(field.to_string()),
    }
}
