//! Plain-text layout for [`Series`] and [`DataFrame`].
//!
//! A frame renders as a header line of column names followed by one line per row: the row
//! position, a space, then the left-justified cells. The separators and padding are configurable
//! through [`RenderOptions`]; `Display` uses the defaults.

use std::fmt::{self, Write as _};

use serde::Deserialize;

use crate::series::Series;
use crate::types::Value;

use super::DataFrame;

/// Layout knobs for [`DataFrame::render`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Placed between column names in the header line.
    pub header_separator: String,
    /// Placed between cells of a row.
    pub cell_separator: String,
    /// Cells are left-justified to this width. `None` pads to the number of columns.
    pub min_cell_width: Option<usize>,
    /// Text shown for null cells.
    pub null_marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            header_separator: "\t".to_string(),
            cell_separator: "   ".to_string(),
            min_cell_width: None,
            null_marker: "null".to_string(),
        }
    }
}

impl RenderOptions {
    fn cell(&self, value: &Value) -> String {
        match value {
            Value::Null => self.null_marker.clone(),
            other => other.to_string(),
        }
    }
}

impl DataFrame {
    /// Render the frame as text.
    ///
    /// ```rust
    /// use mybear::{DataFrame, RenderOptions, Series};
    ///
    /// let df = DataFrame::from_series(vec![Series::new("a", [1, 2]), Series::new("b", ["x", "y"])])
    ///     .unwrap();
    /// let options = RenderOptions {
    ///     cell_separator: " | ".to_string(),
    ///     min_cell_width: Some(0),
    ///     ..RenderOptions::default()
    /// };
    /// assert_eq!(df.render(&options), "a\tb\n0 1 | x\n1 2 | y");
    /// ```
    pub fn render(&self, options: &RenderOptions) -> String {
        let width = options.min_cell_width.unwrap_or_else(|| self.width());
        let mut out = self.columns().join(&options.header_separator);

        for row in 0..self.count() {
            let cells: Vec<String> = self
                .iter()
                .map(|s| format!("{:<width$}", options.cell(&s[row])))
                .collect();
            // Writing into a String cannot fail.
            let _ = write!(out, "\n{row} {}", cells.join(&options.cell_separator));
        }
        out
    }
}

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            writeln!(f, "{i}\t{value}")?;
        }
        write!(
            f,
            "Name: {}, dtype: {}",
            self.name().unwrap_or_default(),
            self.dtype()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::RenderOptions;
    use crate::frame::DataFrame;
    use crate::series::Series;

    fn fruits() -> DataFrame {
        DataFrame::from_series(vec![
            Series::new("name", ["Orange", "Kiwi"]),
            Series::new("price", [Some(15.0), None]),
        ])
        .unwrap()
    }

    #[test]
    fn default_layout_pads_to_column_count() {
        let text = fruits().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name\tprice");
        assert_eq!(lines[1], "0 Orange   15.0");
        assert_eq!(lines[2], "1 Kiwi   null");
    }

    #[test]
    fn custom_options_change_padding_and_null_marker() {
        let options = RenderOptions {
            min_cell_width: Some(7),
            null_marker: "-".to_string(),
            ..RenderOptions::default()
        };
        let text = fruits().render(&options);
        assert_eq!(text.lines().nth(2), Some("1 Kiwi      -      "));
    }

    #[test]
    fn empty_frame_renders_header_only() {
        let df = DataFrame::from_columns(vec!["a", "b"], vec![Vec::new(), Vec::new()]).unwrap();
        assert_eq!(df.to_string(), "a\tb");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: RenderOptions = serde_json::from_str(r#"{"null_marker": "NA"}"#).unwrap();
        assert_eq!(options.null_marker, "NA");
        assert_eq!(options.cell_separator, "   ");
        assert_eq!(options.min_cell_width, None);
    }

    #[test]
    fn series_lists_positions_then_footer() {
        let s = Series::new("price", [1.5, 2.0]);
        assert_eq!(s.to_string(), "0\t1.5\n1\t2.0\nName: price, dtype: float");
    }
}
