//! Key-based joins between two frames.
//!
//! Rows are matched on equal key tuples through a hash map built over one side. A row with a
//! null in any of its key columns never matches. Every column of both inputs is carried into the
//! output; names present on both sides get `_x` (left) and `_y` (right) suffixes, join keys
//! included.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::types::{Value, ValueKey};

use super::DataFrame;

const LEFT_SUFFIX: &str = "_x";
const RIGHT_SUFFIX: &str = "_y";

/// Which rows survive a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinHow {
    /// Every left row, in left order.
    #[default]
    Left,
    /// Every right row, in right order.
    Right,
    /// Only matched rows, in left order.
    Inner,
    /// The left join followed by the unmatched right rows.
    Outer,
}

impl fmt::Display for JoinHow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Inner => "inner",
            Self::Outer => "outer",
        })
    }
}

impl FromStr for JoinHow {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "inner" => Ok(Self::Inner),
            "outer" => Ok(Self::Outer),
            other => {
                tracing::error!(how = other, "unsupported join type");
                Err(FrameError::invalid_argument(format!(
                    "join type must be one of left, right, inner, outer; got '{other}'"
                )))
            }
        }
    }
}

/// Join key columns: one name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JoinOn(Vec<String>);

impl JoinOn {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for JoinOn {
    fn from(name: &str) -> Self {
        Self(vec![name.to_owned()])
    }
}

impl From<String> for JoinOn {
    fn from(name: String) -> Self {
        Self(vec![name])
    }
}

impl From<Vec<String>> for JoinOn {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl From<Vec<&str>> for JoinOn {
    fn from(names: Vec<&str>) -> Self {
        Self(names.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for JoinOn {
    fn from(names: &[&str]) -> Self {
        Self(names.iter().map(|n| (*n).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for JoinOn {
    fn from(names: [&str; N]) -> Self {
        Self(names.iter().map(|n| (*n).to_owned()).collect())
    }
}

/// Output row: a position on each side, `None` where that side is filled with nulls.
type RowPair = (Option<usize>, Option<usize>);

impl DataFrame {
    /// Join `other` onto `self` by matching `left_on` against `right_on`.
    ///
    /// ```rust
    /// use mybear::{DataFrame, JoinHow, Series, Value};
    ///
    /// let fruits = DataFrame::from_series(vec![
    ///     Series::new("id", [1, 2, 3]),
    ///     Series::new("price", [15.0, 1.34, 2.34]),
    /// ])
    /// .unwrap();
    /// let stock = DataFrame::from_series(vec![
    ///     Series::new("id", [3, 1]),
    ///     Series::new("price", [2.5, 14.0]),
    /// ])
    /// .unwrap();
    ///
    /// let joined = fruits.join(&stock, "id", "id", JoinHow::Left).unwrap();
    /// assert_eq!(joined.columns(), vec!["id_x", "price_x", "id_y", "price_y"]);
    /// assert_eq!(joined.column("price_y").unwrap()[1], Value::Null);
    /// ```
    ///
    /// # Errors
    ///
    /// [`FrameError::InvalidArgument`] when either key list is empty or their lengths differ,
    /// [`FrameError::UnknownColumn`] when a key is not a column of its frame, and
    /// [`FrameError::DuplicateColumn`] if suffixing produces a name that already exists.
    pub fn join(
        &self,
        other: &DataFrame,
        left_on: impl Into<JoinOn>,
        right_on: impl Into<JoinOn>,
        how: JoinHow,
    ) -> FrameResult<DataFrame> {
        let left_on = left_on.into();
        let right_on = right_on.into();
        if left_on.is_empty() || right_on.is_empty() {
            tracing::error!(%how, "join called without key columns");
            return Err(FrameError::invalid_argument("join keys must not be empty"));
        }
        if left_on.len() != right_on.len() {
            tracing::error!(
                left = left_on.len(),
                right = right_on.len(),
                "join key lists differ in length"
            );
            return Err(FrameError::invalid_argument(format!(
                "left_on has {} keys but right_on has {}",
                left_on.len(),
                right_on.len()
            )));
        }

        let left_keys = key_columns(self, &left_on)?;
        let right_keys = key_columns(other, &right_on)?;

        let plan = match how {
            JoinHow::Left | JoinHow::Inner | JoinHow::Outer => {
                let index = build_index(&right_keys, other.count());
                let mut matched = vec![false; other.count()];
                let mut plan = Vec::with_capacity(self.count());
                for row in 0..self.count() {
                    match row_key(&left_keys, row).and_then(|key| index.get(&key)) {
                        Some(hits) => {
                            for &hit in hits {
                                matched[hit] = true;
                                plan.push((Some(row), Some(hit)));
                            }
                        }
                        None if how != JoinHow::Inner => plan.push((Some(row), None)),
                        None => {}
                    }
                }
                if how == JoinHow::Outer {
                    plan.extend(
                        matched
                            .iter()
                            .enumerate()
                            .filter(|(_, hit)| !**hit)
                            .map(|(row, _)| (None, Some(row))),
                    );
                }
                plan
            }
            JoinHow::Right => {
                let index = build_index(&left_keys, self.count());
                let mut plan = Vec::with_capacity(other.count());
                for row in 0..other.count() {
                    match row_key(&right_keys, row).and_then(|key| index.get(&key)) {
                        Some(hits) => plan.extend(hits.iter().map(|&hit| (Some(hit), Some(row)))),
                        None => plan.push((None, Some(row))),
                    }
                }
                plan
            }
        };

        tracing::debug!(
            %how,
            left_rows = self.count(),
            right_rows = other.count(),
            rows = plan.len(),
            "joined frames"
        );

        let left_columns = self
            .iter()
            .map(|s| project(s, other, LEFT_SUFFIX, &plan, |pair| pair.0));
        let right_columns = other
            .iter()
            .map(|s| project(s, self, RIGHT_SUFFIX, &plan, |pair| pair.1));
        DataFrame::assemble(left_columns.chain(right_columns).collect())
    }
}

fn key_columns<'a>(frame: &'a DataFrame, on: &JoinOn) -> FrameResult<Vec<&'a Series>> {
    on.names().iter().map(|name| frame.column(name)).collect()
}

/// `None` when any key cell is null.
fn row_key(keys: &[&Series], row: usize) -> Option<Vec<ValueKey>> {
    keys.iter()
        .map(|s| {
            let value = &s[row];
            (!value.is_null()).then(|| value.key())
        })
        .collect()
}

fn build_index(keys: &[&Series], rows: usize) -> HashMap<Vec<ValueKey>, Vec<usize>> {
    let mut index: HashMap<Vec<ValueKey>, Vec<usize>> = HashMap::new();
    for row in 0..rows {
        if let Some(key) = row_key(keys, row) {
            index.entry(key).or_default().push(row);
        }
    }
    index
}

/// Gather one column along the plan, renaming it when `counterpart` has the same name.
fn project(
    series: &Series,
    counterpart: &DataFrame,
    suffix: &str,
    plan: &[RowPair],
    side: impl Fn(&RowPair) -> Option<usize>,
) -> Series {
    let name = series.name().unwrap_or_default();
    let name = if counterpart.position_of(name).is_some() {
        format!("{name}{suffix}")
    } else {
        name.to_owned()
    };
    let values = plan
        .iter()
        .map(|pair| side(pair).map_or(Value::Null, |row| series[row].clone()))
        .collect();
    Series::from_values(Some(name), values)
}
