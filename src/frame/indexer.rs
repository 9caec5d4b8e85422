//! Positional (`iloc`-style) indexing.
//!
//! A row or column selector is either a single position or a half-open range. The shape of the
//! `(rows, columns)` pair decides the shape of the result:
//!
//! | rows  | columns | result                                              |
//! |-------|---------|-----------------------------------------------------|
//! | index | index   | [`Selection::Scalar`]                               |
//! | range | index   | [`Selection::Series`] named after the column        |
//! | index | range   | [`Selection::Frame`] with one row                   |
//! | range | range   | [`Selection::Frame`] with the sliced rows           |
//!
//! Range bounds past the end are clamped, so `0..usize::MAX` means "everything". A single index
//! outside the data is [`FrameError::IndexOutOfRange`].

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};
use std::str::FromStr;

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::types::Value;

use super::DataFrame;

/// A row or column selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// A single position.
    Index(usize),
    /// A half-open `[start, end)` range of positions.
    Range(Range<usize>),
}

impl Selector {
    /// Clamp a range to `len`; a reversed range is [`FrameError::InvalidIndex`].
    pub(crate) fn clamp_range(range: &Range<usize>, len: usize) -> FrameResult<Range<usize>> {
        if range.start > range.end {
            return Err(FrameError::invalid_index(format!(
                "range start {} is after range end {}",
                range.start, range.end
            )));
        }
        let end = range.end.min(len);
        let start = range.start.min(end);
        Ok(start..end)
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Range<usize>> for Selector {
    fn from(range: Range<usize>) -> Self {
        Self::Range(range)
    }
}

impl From<RangeInclusive<usize>> for Selector {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, end) = range.into_inner();
        Self::Range(start..end.saturating_add(1))
    }
}

impl From<RangeFrom<usize>> for Selector {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::Range(range.start..usize::MAX)
    }
}

impl From<RangeTo<usize>> for Selector {
    fn from(range: RangeTo<usize>) -> Self {
        Self::Range(0..range.end)
    }
}

impl From<RangeFull> for Selector {
    fn from(_: RangeFull) -> Self {
        Self::Range(0..usize::MAX)
    }
}

/// Parses `"2"`, `"1:3"`, `":3"`, `"1:"` and `":"`.
impl FromStr for Selector {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_bound = |part: &str| -> FrameResult<Option<usize>> {
            let part = part.trim();
            if part.is_empty() {
                return Ok(None);
            }
            part.parse::<usize>()
                .map(Some)
                .map_err(|e| FrameError::invalid_index(format!("'{s}': {e}")))
        };

        match s.split_once(':') {
            None => parse_bound(s)?
                .map(Self::Index)
                .ok_or_else(|| FrameError::invalid_index("empty selector")),
            Some((start, end)) => {
                let start = parse_bound(start)?.unwrap_or(0);
                let end = parse_bound(end)?.unwrap_or(usize::MAX);
                if start > end {
                    return Err(FrameError::invalid_index(format!(
                        "'{s}': range start is after range end"
                    )));
                }
                Ok(Self::Range(start..end))
            }
        }
    }
}

/// The result of a positional lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// One cell, from `(index, index)`.
    Scalar(Value),
    /// A named slice of one column, from `(range, index)`.
    Series(Series),
    /// A sub-frame, from any selection with a column range.
    Frame(DataFrame),
}

impl Selection {
    /// The cell, if this is a [`Selection::Scalar`].
    pub fn into_scalar(self) -> Option<Value> {
        match self {
            Self::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// The column slice, if this is a [`Selection::Series`].
    pub fn into_series(self) -> Option<Series> {
        match self {
            Self::Series(s) => Some(s),
            _ => None,
        }
    }

    /// The sub-frame, if this is a [`Selection::Frame`].
    pub fn into_frame(self) -> Option<DataFrame> {
        match self {
            Self::Frame(df) => Some(df),
            _ => None,
        }
    }
}

impl DataFrame {
    /// Positional indexing over `(rows, columns)`.
    ///
    /// ```rust
    /// use mybear::{DataFrame, Series, Value};
    ///
    /// let df = DataFrame::from_series(vec![Series::new("a", 0..5), Series::new("b", 5..10)]).unwrap();
    /// assert_eq!(df.iloc(2, 1).unwrap().into_scalar(), Some(Value::Integer(7)));
    /// assert_eq!(df.iloc(1..3, 0).unwrap().into_series(), Some(Series::new("a", 1..3)));
    /// assert_eq!(df.iloc(1, ..).unwrap().into_frame().map(|f| f.count()), Some(1));
    /// ```
    ///
    /// Index selectors must be in bounds. Range selectors are clamped to the frame, so they may
    /// select nothing. A frame's row count comes from its columns, so a column range that clamps
    /// to nothing always yields the empty frame, even when the row selector is valid.
    ///
    /// # Errors
    ///
    /// [`FrameError::IndexOutOfRange`] for an index past the end, and
    /// [`FrameError::InvalidIndex`] for a range whose start is after its end.
    pub fn iloc(
        &self,
        rows: impl Into<Selector>,
        columns: impl Into<Selector>,
    ) -> FrameResult<Selection> {
        match (rows.into(), columns.into()) {
            (Selector::Index(row), Selector::Index(col)) => self
                .column_by_position(col)?
                .get(row)
                .cloned()
                .map(Selection::Scalar),
            (Selector::Range(rows), Selector::Index(col)) => self
                .column_by_position(col)?
                .slice(rows)
                .map(Selection::Series),
            (Selector::Index(row), Selector::Range(cols)) => {
                if row >= self.count() {
                    return Err(FrameError::IndexOutOfRange {
                        index: row,
                        len: self.count(),
                    });
                }
                let series = self
                    .columns_in(cols)?
                    .map(|s| {
                        Series::from_values(s.name().map(str::to_owned), vec![s[row].clone()])
                    })
                    .collect();
                DataFrame::assemble(series).map(Selection::Frame)
            }
            (Selector::Range(rows), Selector::Range(cols)) => {
                let series = self
                    .columns_in(cols)?
                    .map(|s| s.slice(rows.clone()))
                    .collect::<FrameResult<Vec<_>>>()?;
                DataFrame::assemble(series).map(Selection::Frame)
            }
        }
    }

    fn column_by_position(&self, index: usize) -> FrameResult<&Series> {
        self.column_at(index).ok_or(FrameError::IndexOutOfRange {
            index,
            len: self.width(),
        })
    }

    fn columns_in(&self, range: Range<usize>) -> FrameResult<impl Iterator<Item = &Series>> {
        let range = Selector::clamp_range(&range, self.width())?;
        Ok(self.iter().skip(range.start).take(range.len()))
    }
}
