//! CSV reader.
//!
//! The first record is the header and gives the column names; every following record is a row.
//! Cells are read as text and handed to [`DataFrame::from_columns`], which coerces each column to
//! its dominant type. Empty cells become [`Value::Null`].

use std::io::Read;
use std::path::Path;

use crate::error::{FrameError, FrameResult};
use crate::frame::DataFrame;
use crate::types::Value;

/// Options for the CSV reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Strip surrounding whitespace from headers and cells.
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvOptions {
    fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            });
        builder
    }
}

/// Read a CSV file into a [`DataFrame`].
///
/// # Errors
///
/// [`FrameError::FileNotFound`] when `path` does not exist, [`FrameError::Csv`] for unreadable or
/// ragged input, and the construction errors of [`DataFrame::from_columns`] (e.g. duplicate
/// header names).
pub fn read_csv_from_path(path: impl AsRef<Path>, options: &CsvOptions) -> FrameResult<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::error!(path = %path.display(), "csv file not found");
        return Err(FrameError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), delimiter = %char::from(options.delimiter), "reading csv");
    let mut rdr = options.reader_builder().from_path(path)?;
    read_csv_from_reader(&mut rdr)
}

/// Read CSV text held in memory.
pub fn read_csv_from_str(input: &str, options: &CsvOptions) -> FrameResult<DataFrame> {
    let mut rdr = options.reader_builder().from_reader(input.as_bytes());
    read_csv_from_reader(&mut rdr)
}

/// Read CSV data from an existing reader. The reader must be configured with headers.
pub fn read_csv_from_reader<R: Read>(rdr: &mut csv::Reader<R>) -> FrameResult<DataFrame> {
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut data: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for result in rdr.records() {
        let record = result?;
        for (column, cell) in data.iter_mut().zip(record.iter()) {
            column.push(if cell.is_empty() {
                Value::Null
            } else {
                Value::Text(cell.to_owned())
            });
        }
    }

    tracing::debug!(
        columns = headers.len(),
        rows = data.first().map_or(0, Vec::len),
        "parsed csv records"
    );
    DataFrame::from_columns(headers, data)
}

#[cfg(test)]
mod tests {
    use super::{CsvOptions, read_csv_from_str};
    use crate::error::FrameError;
    use crate::types::{DType, Value};

    #[test]
    fn header_names_columns_and_cells_are_coerced() {
        let df = read_csv_from_str("name,price\nOrange,15.0\nKiwi,0.8\n", &CsvOptions::default())
            .unwrap();
        assert_eq!(df.columns(), vec!["name", "price"]);
        assert_eq!(df.column("price").unwrap().dtype(), DType::Float);
        assert_eq!(df.column("name").unwrap()[1], Value::from("Kiwi"));
    }

    #[test]
    fn empty_cells_are_null() {
        let df = read_csv_from_str("a,b\n1,\n,x\n", &CsvOptions::default()).unwrap();
        assert_eq!(df.column("a").unwrap().data(), &[Value::Integer(1), Value::Null]);
        assert_eq!(df.column("b").unwrap()[0], Value::Null);
    }

    #[test]
    fn custom_delimiter_and_trimming() {
        let options = CsvOptions {
            delimiter: b';',
            trim: true,
        };
        let df = read_csv_from_str("id ; city\n 1 ; Lyon \n", &options).unwrap();
        assert_eq!(df.columns(), vec!["id", "city"]);
        assert_eq!(df.column("city").unwrap()[0], Value::from("Lyon"));
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let err = read_csv_from_str("a,b\n1,2,3\n", &CsvOptions::default()).unwrap_err();
        assert!(matches!(err, FrameError::Csv(_)));
    }

    #[test]
    fn header_only_input_gives_empty_columns() {
        let df = read_csv_from_str("a,b\n", &CsvOptions::default()).unwrap();
        assert_eq!(df.width(), 2);
        assert_eq!(df.count(), 0);
    }
}
