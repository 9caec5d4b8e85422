//! Column-oriented table.
//!
//! A [`DataFrame`] is an ordered mapping from unique column names to equally long [`Series`].
//! Every operation returns a new frame; inputs are never mutated.
//!
//! - construction: [`DataFrame::from_series`], [`DataFrame::from_columns`],
//!   [`DataFrame::from_rows`] (the last two run [`crate::coercion`] per column)
//! - positional indexing: [`DataFrame::iloc`] (see [`indexer`])
//! - per-column reductions: [`DataFrame::min`], [`DataFrame::max`], [`DataFrame::mean`],
//!   [`DataFrame::std`]
//! - [`DataFrame::groupby`] and [`DataFrame::join`]

pub mod groupby;
pub mod indexer;
pub mod join;
pub mod render;

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::types::Value;

pub use groupby::Aggregation;
pub use indexer::{Selection, Selector};
pub use join::{JoinHow, JoinOn};
pub use render::RenderOptions;

/// An ordered collection of equally long, uniquely named [`Series`].
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    columns: IndexMap<String, Series>,
}

impl DataFrame {
    /// A frame with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a frame from a list of series.
    ///
    /// Column names come from [`Series::name`]; unnamed series get `"Unnamed <i>"` where `i` is
    /// their position. Each column is type-coerced.
    ///
    /// # Errors
    ///
    /// [`FrameError::DuplicateColumn`] when two names collide, [`FrameError::ShapeMismatch`] when
    /// the series lengths differ.
    pub fn from_series(series: Vec<Series>) -> FrameResult<Self> {
        let named = series
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let name = s
                    .name()
                    .map_or_else(|| format!("Unnamed {i}"), str::to_owned);
                s.coerced().with_name(name)
            })
            .collect();
        Self::assemble(named)
    }

    /// Build a frame from column names and column-major data.
    ///
    /// ```rust
    /// use mybear::{DataFrame, Value};
    ///
    /// let df = DataFrame::from_columns(
    ///     vec!["name", "price"],
    ///     vec![
    ///         vec!["Orange".into(), "Rhubarbe".into()],
    ///         vec!["15.0".into(), "2.34".into()],
    ///     ],
    /// )
    /// .unwrap();
    /// assert_eq!(df.count(), 2);
    /// assert_eq!(df.column("price").unwrap()[0], Value::Float(15.0));
    /// ```
    ///
    /// # Errors
    ///
    /// [`FrameError::ShapeMismatch`] when `columns.len() != data.len()` or the columns have
    /// different lengths, [`FrameError::DuplicateColumn`] on repeated names.
    pub fn from_columns<S: Into<String>>(
        columns: Vec<S>,
        data: Vec<Vec<Value>>,
    ) -> FrameResult<Self> {
        if columns.len() != data.len() {
            return Err(FrameError::shape_mismatch(format!(
                "{} column names but {} data columns",
                columns.len(),
                data.len()
            )));
        }

        let series = columns
            .into_iter()
            .zip(data)
            .map(|(name, values)| Series::from_values(Some(name.into()), values).coerced())
            .collect();
        Self::assemble(series)
    }

    /// Build a frame from column names and row-major data.
    ///
    /// # Errors
    ///
    /// [`FrameError::ShapeMismatch`] when a row does not have one value per column, plus the
    /// errors of [`DataFrame::from_columns`].
    pub fn from_rows<S: Into<String>>(columns: Vec<S>, rows: Vec<Vec<Value>>) -> FrameResult<Self> {
        let width = columns.len();
        let mut data: Vec<Vec<Value>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(FrameError::shape_mismatch(format!(
                    "row {row_idx} has {} values, expected {width}",
                    row.len()
                )));
            }
            for (col, value) in data.iter_mut().zip(row) {
                col.push(value);
            }
        }
        Self::from_columns(columns, data)
    }

    /// Validate and wrap already typed, named series without re-coercing them.
    pub(crate) fn assemble(series: Vec<Series>) -> FrameResult<Self> {
        let mut seen = HashSet::with_capacity(series.len());
        let mut columns = IndexMap::with_capacity(series.len());
        let expected_len = series.first().map(Series::len);

        for s in series {
            let name = s.name().unwrap_or_default().to_owned();
            if !seen.insert(name.clone()) {
                return Err(FrameError::DuplicateColumn { name });
            }
            match expected_len {
                Some(expected) if s.len() != expected => {
                    return Err(FrameError::shape_mismatch(format!(
                        "column '{name}' has length {}, expected {expected}",
                        s.len()
                    )));
                }
                _ => {}
            }
            columns.insert(name, s);
        }

        Ok(Self { columns })
    }

    /// Column names in order.
    pub fn columns(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Number of rows.
    pub fn count(&self) -> usize {
        self.columns.values().next().map_or(0, Series::len)
    }

    /// Alias of [`DataFrame::count`].
    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> FrameResult<&Series> {
        self.columns
            .get(name)
            .ok_or_else(|| FrameError::unknown_column(name))
    }

    /// Column at position `index`.
    pub fn column_at(&self, index: usize) -> Option<&Series> {
        self.columns.get_index(index).map(|(_, s)| s)
    }

    pub(crate) fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    /// Iterate the columns as series, in column order.
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Series> {
        self.columns.values()
    }

    /// Per-column minimum, as a one-row frame.
    pub fn min(&self) -> FrameResult<Self> {
        self.reduce_each(Series::min)
    }

    /// Per-column maximum, as a one-row frame.
    pub fn max(&self) -> FrameResult<Self> {
        self.reduce_each(Series::max)
    }

    /// Per-column mean, as a one-row frame.
    ///
    /// Fails with [`FrameError::NonNumeric`] if any column is not numeric; select numeric columns
    /// first.
    pub fn mean(&self) -> FrameResult<Self> {
        self.reduce_each(|s| s.mean().map(Value::Float))
    }

    /// Per-column population standard deviation, as a one-row frame.
    pub fn std(&self) -> FrameResult<Self> {
        self.reduce_each(|s| s.std().map(Value::Float))
    }

    fn reduce_each<F>(&self, reducer: F) -> FrameResult<Self>
    where
        F: Fn(&Series) -> FrameResult<Value>,
    {
        let series = self
            .columns
            .iter()
            .map(|(name, s)| reducer(s).map(|v| Series::new(name.clone(), [v])))
            .collect::<FrameResult<Vec<_>>>()?;
        Self::assemble(series)
    }
}

impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.columns.keys().eq(other.columns.keys())
            && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<'a> IntoIterator for &'a DataFrame {
    type Item = &'a Series;
    type IntoIter = indexmap::map::Values<'a, String, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.values()
    }
}

#[cfg(test)]
mod tests {
    use super::DataFrame;
    use crate::error::FrameError;
    use crate::series::Series;
    use crate::types::Value;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().copied().map(Value::Integer).collect()
    }

    fn df_series() -> DataFrame {
        DataFrame::from_series(vec![Series::new("a", 0..5), Series::new("b", 5..10)]).unwrap()
    }

    fn df_columns() -> DataFrame {
        DataFrame::from_columns(
            vec!["a", "b"],
            vec![ints(&[0, 1, 2, 3, 4]), ints(&[5, 6, 7, 8, 9])],
        )
        .unwrap()
    }

    #[test]
    fn constructors_agree() {
        assert_eq!(df_series(), df_columns());
        assert_eq!(df_series().min().unwrap(), df_columns().min().unwrap());
        assert_eq!(df_series().count(), 5);
        assert_eq!(df_series().len(), df_series().count());
        assert_eq!(df_series().columns(), vec!["a", "b"]);
    }

    #[test]
    fn unnamed_series_get_synthesized_names() {
        let df = DataFrame::from_series(vec![
            Series::unnamed(0..2),
            Series::new("x", 0..2),
            Series::unnamed(0..2),
        ])
        .unwrap();
        assert_eq!(df.columns(), vec!["Unnamed 0", "x", "Unnamed 2"]);
        assert_eq!(df.column("Unnamed 2").unwrap().name(), Some("Unnamed 2"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err =
            DataFrame::from_series(vec![Series::new("a", 0..2), Series::new("a", 0..2)]).unwrap_err();
        assert!(matches!(err, FrameError::DuplicateColumn { ref name } if name == "a"));

        let err = DataFrame::from_columns(vec!["a", "a"], vec![ints(&[1]), ints(&[2])]).unwrap_err();
        assert!(matches!(err, FrameError::DuplicateColumn { .. }));
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let err = DataFrame::from_columns(
            vec!["a", "b"],
            vec![ints(&[0, 1, 2, 3, 4]), ints(&[0, 1, 2, 3])],
        )
        .unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
        assert!(err.to_string().contains("length"));

        let err = DataFrame::from_columns(vec!["a"], vec![ints(&[1]), ints(&[2])]).unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));

        let err = DataFrame::from_series(vec![Series::new("a", 0..5), Series::new("b", 0..4)])
            .unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
    }

    #[test]
    fn from_rows_transposes_and_coerces() {
        let df = DataFrame::from_rows(
            vec!["id", "name"],
            vec![
                vec!["1".into(), "Ada".into()],
                vec!["2".into(), "Grace".into()],
            ],
        )
        .unwrap();
        assert_eq!(df.column("id").unwrap().data(), &ints(&[1, 2])[..]);
        assert_eq!(df.column("name").unwrap()[1], Value::from("Grace"));

        let err = DataFrame::from_rows(vec!["id", "name"], vec![vec![Value::Integer(1)]]).unwrap_err();
        assert!(matches!(err, FrameError::ShapeMismatch { .. }));
    }

    #[test]
    fn reductions_produce_one_row_frames() {
        let df = df_series();
        let expected_max =
            DataFrame::from_series(vec![Series::new("a", [4]), Series::new("b", [9])]).unwrap();
        assert_eq!(df.max().unwrap(), expected_max);

        let mean = df.mean().unwrap();
        assert_eq!(mean.count(), 1);
        assert_eq!(mean.column("a").unwrap()[0], Value::Float(2.0));
        assert_eq!(mean.column("b").unwrap()[0], Value::Float(7.0));

        let std = df.std().unwrap();
        assert!((std.column("a").unwrap()[0].as_f64().unwrap() - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn min_is_not_above_max() {
        let df = df_columns();
        let mins = df.min().unwrap();
        let maxs = df.max().unwrap();
        for (lo, hi) in mins.iter().zip(maxs.iter()) {
            assert!(lo[0] <= hi[0]);
        }
    }

    #[test]
    fn mean_on_text_column_propagates_non_numeric() {
        let df = DataFrame::from_columns(
            vec!["name", "price"],
            vec![
                vec!["Orange".into(), "Rhubarbe".into()],
                vec![Value::Float(1.0), Value::Float(2.0)],
            ],
        )
        .unwrap();
        let err = df.mean().unwrap_err();
        assert!(matches!(err, FrameError::NonNumeric { ref column, .. } if column.as_deref() == Some("name")));
        // min/max still work on text.
        assert_eq!(df.min().unwrap().column("name").unwrap()[0], Value::from("Orange"));
    }

    #[test]
    fn iteration_yields_columns_in_order() {
        let df = df_series();
        let names: Vec<_> = df.iter().map(|s| s.name().unwrap().to_owned()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!((&df).into_iter().count(), 2);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab = DataFrame::from_series(vec![Series::new("a", 0..2), Series::new("b", 0..2)]).unwrap();
        let ba = DataFrame::from_series(vec![Series::new("b", 0..2), Series::new("a", 0..2)]).unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn empty_frame_has_zero_rows() {
        let df = DataFrame::empty();
        assert_eq!(df.count(), 0);
        assert!(df.is_empty());
        assert_eq!(df.width(), 0);
        assert_eq!(DataFrame::from_series(Vec::new()).unwrap(), df);
    }
}
