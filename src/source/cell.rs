/// A typed cell value as read from a tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Dates, durations and spreadsheet error values.
    Other(String),
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Short type name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Text(_) => "text",
            Cell::Number(_) => "number",
            Cell::Bool(_) => "bool",
            Cell::Other(_) => "other",
            Cell::Empty => "empty",
        }
    }
}

/// One row of a sheet. Trailing empty cells are dropped, so `cells.len()` is
/// the number of columns up to and including the last populated one.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(index: usize, mut cells: Vec<Cell>) -> Self {
        while cells.last().is_some_and(Cell::is_empty) {
            cells.pop();
        }
        Self { index, cells }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_trims_trailing_empty_cells() {
        let row = Row::new(
            3,
            vec![Cell::Text("Alice".into()), Cell::Empty, Cell::Empty],
        );
        assert_eq!(row.index, 3);
        assert_eq!(row.width(), 1);
    }

    #[test]
    fn test_row_keeps_inner_empty_cells() {
        let row = Row::new(1, vec![Cell::Empty, Cell::Number(4.0)]);
        assert_eq!(row.width(), 2);
        assert_eq!(row.get(0), Some(&Cell::Empty));
        assert_eq!(row.get(1), Some(&Cell::Number(4.0)));
        assert_eq!(row.get(2), None);
    }
}
