//! Student records and the fixed five-point grading scale.

use serde::Serialize;
use thiserror::Error;

const MIN_GRADE: f64 = 1.0;
const MAX_GRADE: f64 = 5.0;

const EXCELLENT_GRADE: f64 = 5.0;
const GOOD_GRADE: f64 = 4.0;
const SATISFACTORY_GRADE: f64 = 3.0;

/// Reasons a [`Student`] cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StudentError {
    #[error("student name cannot be blank")]
    BlankName,
    #[error("grade {0} is outside the range 1..=5")]
    GradeOutOfRange(f64),
}

/// A single roster entry. Only constructed through [`Student::new`], so the
/// name is never blank and the grade always lies in `1..=5`.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    name: String,
    grade: f64,
}

impl Student {
    /// Validates and builds a student. The stored name is trimmed.
    pub fn new(name: &str, grade: f64) -> Result<Self, StudentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StudentError::BlankName);
        }

        // NaN fails `contains` as well
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(StudentError::GradeOutOfRange(grade));
        }

        Ok(Self {
            name: name.to_string(),
            grade,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }

    pub fn category(&self) -> Category {
        Category::from_grade(self.grade)
    }
}

/// Performance bucket derived from a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Excellent,
    Good,
    Satisfactory,
    Failing,
}

impl Category {
    /// Report column order.
    pub const ALL: [Category; 4] = [
        Category::Excellent,
        Category::Good,
        Category::Satisfactory,
        Category::Failing,
    ];

    /// Classifies a grade by exact comparison against the scale.
    ///
    /// | Grade      | Category     |
    /// |------------|--------------|
    /// | 5          | Excellent    |
    /// | 4          | Good         |
    /// | 3          | Satisfactory |
    /// | otherwise  | Failing      |
    pub fn from_grade(grade: f64) -> Self {
        match grade {
            g if g == EXCELLENT_GRADE => Category::Excellent,
            g if g == GOOD_GRADE => Category::Good,
            g if g == SATISFACTORY_GRADE => Category::Satisfactory,
            _ => Category::Failing,
        }
    }

    /// Column header used in the spreadsheet report.
    pub fn label(self) -> &'static str {
        match self {
            Category::Excellent => "Excellent",
            Category::Good => "Good",
            Category::Satisfactory => "Satisfactory",
            Category::Failing => "Failing",
        }
    }

    /// Bar label used in the chart.
    pub fn chart_label(self) -> &'static str {
        match self {
            Category::Excellent => "Excellent (5)",
            Category::Good => "Good (4)",
            Category::Satisfactory => "Satisfactory (3)",
            Category::Failing => "Not admitted (2 or 1)",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Category::Excellent => 0,
            Category::Good => 1,
            Category::Satisfactory => 2,
            Category::Failing => 3,
        }
    }
}
