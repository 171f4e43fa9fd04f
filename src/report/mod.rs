//! Spreadsheet report output.
//!
//! [`ReportLayout`] decides what goes in every cell; [`write_report`] turns
//! that layout into an xlsx document and persists it without ever replacing
//! an existing file.

mod layout;

pub use layout::{
    COUNT_ROW, CellValue, HEADER_ROW, NAMES_START_ROW, ReportCell, ReportLayout,
};

use crate::stats::GradeStats;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, FormatAlign, Workbook};
use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{error, info, warn};

pub const DEFAULT_REPORT_PATH: &str = "grade_analysis_report.xlsx";
const SHEET_NAME: &str = "Analysis";

/// Proof that a report reached disk. Only [`write_report`] creates one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportWritten {
    path: PathBuf,
}

impl ReportWritten {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    Written(ReportWritten),
    /// A file was already present at the target path; nothing was written.
    AlreadyExists(PathBuf),
}

/// Writes the analysis sheet for `stats` to `path`.
///
/// The whole workbook is built in memory, written to a temporary file next
/// to `path` and moved into place only if nothing exists there yet. An
/// existing file at `path` is left alone and reported as
/// [`WriteOutcome::AlreadyExists`]; a failed write leaves nothing behind.
#[tracing::instrument(skip(path, stats), fields(path = %path.display()))]
pub fn write_report(path: &Path, stats: &GradeStats) -> Result<WriteOutcome> {
    if path.exists() {
        warn!("Output file already exists; choose a different name or delete the existing file");
        return Ok(WriteOutcome::AlreadyExists(path.to_path_buf()));
    }

    let layout = ReportLayout::from_stats(stats);
    let buffer =
        render_xlsx(&layout).inspect_err(|e| error!(error = %e, "Failed to build report"))?;

    let created = persist_new(path, |file| file.write_all(&buffer))
        .inspect_err(|e| error!(error = %e, "Failed to write report file"))
        .with_context(|| format!("failed to write '{}'", path.display()))?;

    if !created {
        warn!("Output file appeared before it could be created; leaving it untouched");
        return Ok(WriteOutcome::AlreadyExists(path.to_path_buf()));
    }

    info!(bytes = buffer.len(), "Report written");
    Ok(WriteOutcome::Written(ReportWritten {
        path: path.to_path_buf(),
    }))
}

/// Fills a temporary file in the directory of `path`, then links it to
/// `path` unless something is already there. Returns `false` in that case.
/// The temporary file is removed on every failure path.
fn persist_new(path: &Path, fill: impl FnOnce(&mut File) -> io::Result<()>) -> io::Result<bool> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    fill(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;

    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error),
    }
}

/// Serializes a layout into xlsx bytes.
pub fn render_xlsx(layout: &ReportLayout) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let centered = Format::new().set_align(FormatAlign::Center);
    let plain = Format::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (r, row) in layout.rows().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let format = if cell.centered { &centered } else { &plain };
            let (r, c) = (r as u32, c as u16);
            match &cell.value {
                CellValue::Text(s) => sheet.write_string_with_format(r, c, s, format)?,
                CellValue::Number(n) => sheet.write_number_with_format(r, c, *n, format)?,
            };
        }
    }

    sheet.autofit();

    workbook
        .save_to_buffer()
        .context("failed to serialize workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Student;
    use calamine::{Data, Reader, Xlsx, open_workbook};
    use std::fs;
    use tempfile::tempdir;

    fn sample_stats() -> GradeStats {
        let students: Vec<_> = [("Alice", 5.0), ("Bob", 4.0), ("Cara", 3.0), ("Dan", 2.0)]
            .iter()
            .map(|(n, g)| Student::new(n, *g).unwrap())
            .collect();
        GradeStats::from_students(&students)
    }

    #[test]
    fn test_write_report_creates_readable_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let outcome = write_report(&path, &sample_stats()).unwrap();
        assert!(matches!(&outcome, WriteOutcome::Written(w) if w.path() == path));

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        assert_eq!(workbook.sheet_names(), ["Analysis"]);
        let range = workbook.worksheet_range("Analysis").unwrap();

        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Criterion".into())));
        assert_eq!(range.get_value((0, 5)), Some(&Data::String("Maximum grade".into())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(1.0)));
        assert_eq!(range.get_value((1, 5)), Some(&Data::Float(5.0)));
        assert_eq!(range.get_value((2, 1)), Some(&Data::String("Alice".into())));
        assert_eq!(range.get_value((2, 4)), Some(&Data::String("Dan".into())));
        assert_eq!(range.get_value((4, 0)), Some(&Data::String("Group average grade".into())));
        assert_eq!(range.get_value((4, 1)), Some(&Data::Float(3.5)));
    }

    #[test]
    fn test_write_report_never_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        fs::write(&path, b"keep me").unwrap();

        let outcome = write_report(&path, &sample_stats()).unwrap();

        assert_eq!(outcome, WriteOutcome::AlreadyExists(path.clone()));
        assert_eq!(fs::read(&path).unwrap(), b"keep me");
    }

    #[test]
    fn test_write_report_empty_roster() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        let stats = GradeStats::from_students(std::iter::empty());
        assert!(matches!(
            write_report(&path, &stats).unwrap(),
            WriteOutcome::Written(_)
        ));

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Analysis").unwrap();
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(0.0)));
        assert_eq!(range.get_value((3, 1)), Some(&Data::Float(0.0)));
    }

    #[test]
    fn test_filler_cells_are_not_stored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("uneven.xlsx");
        let students: Vec<_> = [("Alice", 5.0), ("Bob", 4.0), ("Bea", 4.0)]
            .iter()
            .map(|(n, g)| Student::new(n, *g).unwrap())
            .collect();

        write_report(&path, &GradeStats::from_students(&students)).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Analysis").unwrap();
        assert_eq!(range.get_value((3, 2)), Some(&Data::String("Bea".into())));
        // empty-string fillers are dropped by the writer, so the cell reads as empty
        assert!(matches!(range.get_value((3, 1)), None | Some(Data::Empty)));
        let Some(Data::Float(average)) = range.get_value((5, 1)) else {
            panic!("average row should hold a number");
        };
        assert!((average - 13.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let result = persist_new(&path, |file| {
            file.write_all(b"PK\x03\x04 partial")?;
            Err(io::Error::other("disk full"))
        });

        assert!(result.is_err());
        assert!(!path.exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_persist_new_keeps_file_that_appeared() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.xlsx");

        let created = persist_new(&path, |file| {
            // another writer wins the race while this one is still filling its copy
            fs::write(&path, b"theirs")?;
            file.write_all(b"ours")
        })
        .unwrap();

        assert!(!created);
        assert_eq!(fs::read(&path).unwrap(), b"theirs");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_report_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/report.xlsx");

        assert!(write_report(&path, &sample_stats()).is_err());
        assert!(!path.exists());
    }
}
