//! Turns raw sheet rows into validated [`Student`] records.

use crate::source::{Cell, Row};
use crate::student::{Student, StudentError};
use std::fmt;
use tracing::{debug, error};

const HEADER_ROW: usize = 0;
const NAME_COL: usize = 0;
const GRADE_COL: usize = 1;

/// Why a data row did not produce a student.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// Name or grade cell is absent or holds the wrong type.
    InvalidCell {
        column: usize,
        expected: &'static str,
        found: &'static str,
    },
    /// Cells were well typed but the values failed validation.
    Rejected(StudentError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidCell {
                column,
                expected,
                found,
            } => write!(f, "column {column}: expected {expected}, found {found}"),
            SkipReason::Rejected(e) => write!(f, "{e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

/// Students in input order plus every row that was dropped along the way.
#[derive(Debug, Default)]
pub struct Ingested {
    pub students: Vec<Student>,
    pub skipped: Vec<SkippedRow>,
}

/// Reads students out of `rows`.
///
/// The header row and rows with fewer than two columns are ignored without
/// comment. Rows with a non-text name, a non-numeric grade, or values that
/// fail [`Student::new`] are logged and recorded in [`Ingested::skipped`].
pub fn ingest(rows: &[Row]) -> Ingested {
    let mut out = Ingested::default();

    for row in rows {
        if row.index == HEADER_ROW || row.width() < 2 {
            continue;
        }

        match student_from_row(row) {
            Ok(student) => {
                debug!(
                    row = row.index,
                    name = student.name(),
                    grade = student.grade(),
                    "Student read"
                );
                out.students.push(student);
            }
            Err(reason) => {
                error!(row = row.index, %reason, "Invalid row, skipping");
                out.skipped.push(SkippedRow {
                    row: row.index,
                    reason,
                });
            }
        }
    }

    out
}

fn student_from_row(row: &Row) -> Result<Student, SkipReason> {
    let name = match row.get(NAME_COL) {
        Some(Cell::Text(s)) => s,
        other => return Err(invalid(NAME_COL, "text", other)),
    };

    let grade = match row.get(GRADE_COL) {
        Some(Cell::Number(n)) => *n,
        other => return Err(invalid(GRADE_COL, "number", other)),
    };

    Student::new(name, grade).map_err(SkipReason::Rejected)
}

fn invalid(column: usize, expected: &'static str, found: Option<&Cell>) -> SkipReason {
    SkipReason::InvalidCell {
        column,
        expected,
        found: found.map_or("nothing", Cell::kind),
    }
}
