//! Cell-by-cell shape of the analysis sheet, independent of the file format.

use crate::stats::GradeStats;
use crate::student::Category;

pub const HEADER_ROW: usize = 0;
pub const COUNT_ROW: usize = 1;
pub const NAMES_START_ROW: usize = 2;

const MISSING_MAX: &str = "n/a";

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCell {
    pub value: CellValue,
    pub centered: bool,
}

impl ReportCell {
    fn text(s: &str) -> Self {
        Self {
            value: CellValue::Text(s.to_string()),
            centered: false,
        }
    }

    fn number(n: f64) -> Self {
        Self {
            value: CellValue::Number(n),
            centered: false,
        }
    }

    fn centered(mut self) -> Self {
        self.centered = true;
        self
    }
}

/// The report as a grid of rows. Rows may be empty (the spacer above the
/// average row) and are never ragged within the name block.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    rows: Vec<Vec<ReportCell>>,
}

impl ReportLayout {
    /// Lays out the sheet:
    ///
    /// | Row              | Contents                                         |
    /// |------------------|--------------------------------------------------|
    /// | 0                | `Criterion`, category headers, `Maximum grade`   |
    /// | 1                | `Count`, category counts, max grade              |
    /// | 2 ..             | `Full name`, then one name per row per category  |
    /// | 2 + max_rows + 1 | `Group average grade`, average                   |
    pub fn from_stats(stats: &GradeStats) -> Self {
        let max_rows = stats.largest_group();
        let mut rows = Vec::with_capacity(NAMES_START_ROW + max_rows + 2);

        let mut header = vec![ReportCell::text("Criterion")];
        header.extend(
            Category::ALL
                .iter()
                .map(|c| ReportCell::text(c.label()).centered()),
        );
        header.push(ReportCell::text("Maximum grade"));
        rows.push(header);

        let mut counts = vec![ReportCell::text("Count")];
        counts.extend(
            Category::ALL
                .iter()
                .map(|c| ReportCell::number(stats.count(*c) as f64).centered()),
        );
        counts.push(match stats.max_grade() {
            Some(max) => ReportCell::number(max).centered(),
            None => ReportCell::text(MISSING_MAX).centered(),
        });
        rows.push(counts);

        for i in 0..max_rows {
            let label = if i == 0 { "Full name" } else { "" };
            let mut row = vec![ReportCell::text(label)];
            row.extend(Category::ALL.iter().map(|c| {
                let name = stats.names(*c).get(i).map_or("", String::as_str);
                ReportCell::text(name)
            }));
            rows.push(row);
        }

        // The label row exists even with no names to list
        if max_rows == 0 {
            rows.push(vec![ReportCell::text("Full name")]);
        }

        // pad with blank rows up to the average row
        while rows.len() < Self::average_row_for(max_rows) {
            rows.push(Vec::new());
        }

        rows.push(vec![
            ReportCell::text("Group average grade"),
            ReportCell::number(stats.average_grade()).centered(),
        ]);

        Self { rows }
    }

    /// Index of the `Group average grade` row for a name block of `max_rows`.
    pub fn average_row_for(max_rows: usize) -> usize {
        NAMES_START_ROW + max_rows + 1
    }

    pub fn rows(&self) -> &[Vec<ReportCell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&ReportCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Widest row, which is the header.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Student;

    fn stats_for(entries: &[(&str, f64)]) -> GradeStats {
        let students: Vec<_> = entries
            .iter()
            .map(|(n, g)| Student::new(n, *g).unwrap())
            .collect();
        GradeStats::from_students(&students)
    }

    fn text_at(layout: &ReportLayout, row: usize, col: usize) -> Option<&str> {
        match layout.cell(row, col).map(|c| &c.value) {
            Some(CellValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    fn number_at(layout: &ReportLayout, row: usize, col: usize) -> Option<f64> {
        match layout.cell(row, col).map(|c| &c.value) {
            Some(CellValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    #[test]
    fn test_header_row() {
        let layout = ReportLayout::from_stats(&stats_for(&[]));
        let labels: Vec<_> = (0..6).map(|c| text_at(&layout, HEADER_ROW, c)).collect();

        assert_eq!(
            labels,
            [
                Some("Criterion"),
                Some("Excellent"),
                Some("Good"),
                Some("Satisfactory"),
                Some("Failing"),
                Some("Maximum grade"),
            ]
        );
        assert!(layout.cell(HEADER_ROW, 1).unwrap().centered);
        assert!(!layout.cell(HEADER_ROW, 0).unwrap().centered);
        assert_eq!(layout.width(), 6);
    }

    #[test]
    fn test_count_row_is_centered() {
        let layout = ReportLayout::from_stats(&stats_for(&[("A", 5.0), ("B", 4.0), ("C", 4.0)]));

        assert_eq!(text_at(&layout, COUNT_ROW, 0), Some("Count"));
        assert_eq!(number_at(&layout, COUNT_ROW, 1), Some(1.0));
        assert_eq!(number_at(&layout, COUNT_ROW, 2), Some(2.0));
        assert_eq!(number_at(&layout, COUNT_ROW, 3), Some(0.0));
        assert_eq!(number_at(&layout, COUNT_ROW, 4), Some(0.0));
        assert_eq!(number_at(&layout, COUNT_ROW, 5), Some(5.0));
        for col in 1..6 {
            assert!(layout.cell(COUNT_ROW, col).unwrap().centered);
        }
    }

    #[test]
    fn test_name_block_is_rectangular() {
        let layout = ReportLayout::from_stats(&stats_for(&[
            ("Ann", 4.0),
            ("Ben", 4.0),
            ("Cid", 4.0),
            ("Dee", 5.0),
        ]));

        assert_eq!(text_at(&layout, 2, 0), Some("Full name"));
        assert_eq!(text_at(&layout, 2, 1), Some("Dee"));
        assert_eq!(text_at(&layout, 3, 1), Some(""));
        assert_eq!(text_at(&layout, 4, 1), Some(""));
        assert_eq!(text_at(&layout, 2, 2), Some("Ann"));
        assert_eq!(text_at(&layout, 3, 2), Some("Ben"));
        assert_eq!(text_at(&layout, 4, 2), Some("Cid"));
        for row in 2..5 {
            assert_eq!(layout.rows()[row].len(), 5);
            assert_eq!(text_at(&layout, row, 3), Some(""));
            assert_eq!(text_at(&layout, row, 4), Some(""));
        }
    }

    #[test]
    fn test_average_row_position() {
        let layout = ReportLayout::from_stats(&stats_for(&[("A", 5.0), ("B", 5.0), ("C", 2.0)]));

        // two names in the largest group: rows 2..4, gap at 4, average at 5
        assert_eq!(ReportLayout::average_row_for(2), 5);
        assert!(layout.rows()[4].is_empty());
        assert_eq!(text_at(&layout, 5, 0), Some("Group average grade"));
        assert_eq!(number_at(&layout, 5, 1), Some(4.0));
        assert!(layout.cell(5, 1).unwrap().centered);
        assert_eq!(layout.rows().len(), 6);
    }

    #[test]
    fn test_empty_roster_layout() {
        let layout = ReportLayout::from_stats(&stats_for(&[]));

        for col in 1..5 {
            assert_eq!(number_at(&layout, COUNT_ROW, col), Some(0.0));
        }
        assert_eq!(text_at(&layout, COUNT_ROW, 5), Some("n/a"));
        assert_eq!(text_at(&layout, 2, 0), Some("Full name"));
        assert_eq!(text_at(&layout, 3, 0), Some("Group average grade"));
        assert_eq!(number_at(&layout, 3, 1), Some(0.0));
    }
}
