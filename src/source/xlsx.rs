//! Workbook reader backed by `calamine`.

use super::cell::{Cell, Row};
use super::reader::{SourceError, TabularReader};
use anyhow::{Result, anyhow};
use calamine::{Data, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the first sheet of a spreadsheet workbook.
pub struct XlsxSource {
    path: PathBuf,
    workbook: Sheets<BufReader<File>>,
}

impl XlsxSource {
    pub fn open(path: &Path) -> Result<Self> {
        let workbook = open_workbook_auto(path)
            .map_err(|e| anyhow!("failed to open workbook '{}': {e}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            workbook,
        })
    }
}

impl TabularReader for XlsxSource {
    fn rows(&mut self) -> Result<Vec<Row>> {
        let range = first_sheet(&self.path, self.workbook.worksheet_range_at(0))?;

        // calamine trims the range to the used area; put rows and columns
        // back at their absolute positions.
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let rows: Vec<Row> = range
            .rows()
            .enumerate()
            .map(|(i, data)| {
                let cells = std::iter::repeat_n(Cell::Empty, col_offset)
                    .chain(data.iter().map(to_cell))
                    .collect();
                Row::new(row_offset + i, cells)
            })
            .collect();

        debug!(path = %self.path.display(), rows = rows.len(), "Sheet loaded");
        Ok(rows)
    }
}

/// Unwraps the lookup of the first sheet; a workbook without one is a
/// [`SourceError::MissingSheet`].
fn first_sheet<T, E: std::fmt::Display>(path: &Path, sheet: Option<Result<T, E>>) -> Result<T> {
    sheet
        .ok_or_else(|| SourceError::MissingSheet(path.to_path_buf()))?
        .map_err(|e| anyhow!("failed to read first sheet of '{}': {e}", path.display()))
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Other(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Other(s.clone()),
        Data::Error(e) => Cell::Other(format!("#{e:?}")),
    }
}
