use serde::Serialize;

use crate::student::{Category, Student};

/// Names collected for one category, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub count: usize,
    pub names: Vec<String>,
}

/// Summary of a roster: who landed in which category, the best grade and
/// the group average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeStats {
    total: usize,
    groups: [CategoryGroup; 4],
    max_grade: Option<f64>,
    average_grade: f64,
}

/// Running state of the fold in [`GradeStats::from_students`].
#[derive(Default)]
struct Tally {
    total: usize,
    sum: f64,
    max: Option<f64>,
    names: [Vec<String>; 4],
}

impl Tally {
    fn push(mut self, student: &Student) -> Self {
        let grade = student.grade();

        self.total += 1;
        self.sum += grade;
        self.max = Some(self.max.map_or(grade, |m| m.max(grade)));
        self.names[student.category().index()].push(student.name().to_string());

        self
    }

    fn finish(self) -> GradeStats {
        let average_grade = if self.total == 0 {
            0.0
        } else {
            self.sum / self.total as f64
        };

        let Tally {
            total,
            max,
            names,
            ..
        } = self;

        let mut names = names.into_iter();
        let groups = Category::ALL.map(|category| {
            let names = names.next().unwrap_or_default();
            CategoryGroup {
                category,
                count: names.len(),
                names,
            }
        });

        GradeStats {
            total,
            groups,
            max_grade: max,
            average_grade,
        }
    }
}

impl GradeStats {
    /// Folds students into a summary in a single ordered pass. Never fails;
    /// an empty roster gives zero counts, no maximum and an average of 0.
    pub fn from_students<'a>(students: impl IntoIterator<Item = &'a Student>) -> Self {
        students
            .into_iter()
            .fold(Tally::default(), Tally::push)
            .finish()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn group(&self, category: Category) -> &CategoryGroup {
        &self.groups[category.index()]
    }

    pub fn count(&self, category: Category) -> usize {
        self.group(category).count
    }

    pub fn names(&self, category: Category) -> &[String] {
        &self.group(category).names
    }

    /// Highest grade seen, or `None` when the roster is empty.
    pub fn max_grade(&self) -> Option<f64> {
        self.max_grade
    }

    pub fn average_grade(&self) -> f64 {
        self.average_grade
    }

    /// Size of the biggest category; the height of the name block in the
    /// report.
    pub fn largest_group(&self) -> usize {
        self.groups.iter().map(|g| g.count).max().unwrap_or(0)
    }
}
