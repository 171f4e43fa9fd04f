mod cell;
mod delimited;
mod reader;
mod xlsx;

pub use cell::{Cell, Row};
pub use delimited::CsvSource;
pub use reader::{SourceError, TabularReader};
pub use xlsx::XlsxSource;

use anyhow::Result;
use std::path::Path;

/// Opens a tabular source, picking the reader from the file extension.
///
/// `.csv` files are read as comma-separated text; anything else is handed to
/// the workbook reader, which understands xlsx, xlsm, xlsb, xls and ods.
pub fn open_source(path: &Path) -> Result<Box<dyn TabularReader>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        Ok(Box::new(CsvSource::open(path)?))
    } else {
        Ok(Box::new(XlsxSource::open(path)?))
    }
}
