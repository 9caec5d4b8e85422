//! Single-key grouping with one shared aggregator.
//!
//! Grouping policy:
//!
//! - the *active* key is the first column of `by` that also appears in `agg`, and its aggregator
//!   is the one applied to every non-key column;
//! - rows are partitioned by the active key's distinct values in first-seen order;
//! - key columns keep the first member of each group;
//! - non-key columns get one aggregated value per multi-member group (in group order), followed by
//!   the untouched values of single-member groups in their original row order;
//! - nulls are left out of every aggregation, so a group whose members are all null aggregates to
//!   null (or `0` for [`Aggregation::Count`]).
//!
//! The output has one row per distinct key value.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{FrameError, FrameResult};
use crate::series::Series;
use crate::types::{Value, ValueKey};

use super::DataFrame;

/// Reduction applied to the members of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Numeric sum, or concatenation for text.
    Sum,
    Min,
    Max,
    Mean,
    /// Population standard deviation.
    Std,
    /// Number of non-null values.
    Count,
}

impl Aggregation {
    /// Reduce `series` to a single value.
    pub fn apply(self, series: &Series) -> FrameResult<Value> {
        match self {
            Self::Sum => series.sum(),
            Self::Min => series.min(),
            Self::Max => series.max(),
            Self::Mean => series.mean().map(Value::Float),
            Self::Std => series.std().map(Value::Float),
            Self::Count => Ok(Value::Integer(
                (series.count() - series.null_count()) as i64,
            )),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
            Self::Std => "std",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Aggregation {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "mean" => Ok(Self::Mean),
            "std" => Ok(Self::Std),
            "count" => Ok(Self::Count),
            other => Err(FrameError::invalid_argument(format!(
                "unknown aggregation '{other}'"
            ))),
        }
    }
}

impl DataFrame {
    /// Group rows by the active key of `by` and aggregate the other columns.
    ///
    /// ```rust
    /// use mybear::{Aggregation, DataFrame, Value};
    ///
    /// let df = DataFrame::from_columns(
    ///     vec!["name", "price"],
    ///     vec![
    ///         vec!["Orange".into(), "Pamplemousse".into(), "Rhubarbe".into(), "Orange".into()],
    ///         vec![15.0.into(), 1.34.into(), 2.34.into(), 15.0.into()],
    ///     ],
    /// )
    /// .unwrap();
    /// let grouped = df.groupby(&["price"], &[("price", Aggregation::Min)]).unwrap();
    /// assert_eq!(grouped.columns(), vec!["price", "name"]);
    /// assert_eq!(grouped.count(), 3);
    /// assert_eq!(grouped.column("name").unwrap()[0], Value::from("Orange"));
    /// ```
    ///
    /// # Errors
    ///
    /// [`FrameError::InvalidArgument`] when `by` is empty or none of its columns is in `agg`,
    /// [`FrameError::UnknownColumn`] for names that are not columns, and whatever the aggregator
    /// returns for a group it cannot reduce.
    pub fn groupby(&self, by: &[&str], agg: &[(&str, Aggregation)]) -> FrameResult<DataFrame> {
        if by.is_empty() {
            tracing::error!("groupby called without grouping columns");
            return Err(FrameError::invalid_argument("groupby needs at least one column"));
        }
        for name in by.iter().copied().chain(agg.iter().map(|(name, _)| *name)) {
            self.column(name)?;
        }

        let aggregator_for =
            |name: &str| agg.iter().find(|(n, _)| *n == name).map(|(_, a)| *a);
        let Some((active, aggregation)) = by
            .iter()
            .find_map(|name| aggregator_for(*name).map(|a| (*name, a)))
        else {
            tracing::error!(?by, "no grouping column has an aggregation");
            return Err(FrameError::invalid_argument(
                "none of the grouping columns appears in the aggregations",
            ));
        };

        let groups = partition(self.column(active)?);
        tracing::debug!(
            key = active,
            %aggregation,
            groups = groups.len(),
            "grouping rows"
        );

        let mut out = Vec::with_capacity(self.width());
        for name in by.iter().filter(|name| aggregator_for(**name).is_some()) {
            let column = self.column(name)?;
            let representatives = groups.iter().map(|rows| column[rows[0]].clone()).collect();
            out.push(Series::from_values(Some((*name).to_owned()), representatives));
        }

        for column in self.iter() {
            let name = column.name().unwrap_or_default();
            if by.iter().any(|b| *b == name) {
                continue;
            }
            let mut values = Vec::with_capacity(groups.len());
            for rows in groups.iter().filter(|rows| rows.len() > 1) {
                let members = rows.iter().map(|&row| column[row].clone()).collect();
                let members = Series::from_values(Some(name.to_owned()), members);
                // A group with no present values has an empty domain.
                if members.null_count() == members.count() && aggregation != Aggregation::Count {
                    values.push(Value::Null);
                    continue;
                }
                values.push(aggregation.apply(&members)?);
            }
            for rows in groups.iter().filter(|rows| rows.len() == 1) {
                values.push(column[rows[0]].clone());
            }
            out.push(Series::from_values(Some(name.to_owned()), values));
        }

        DataFrame::assemble(out)
    }
}

/// Row positions per distinct value, in first-seen order. Every group is non-empty.
fn partition(column: &Series) -> Vec<Vec<usize>> {
    let mut groups: IndexMap<ValueKey, Vec<usize>> = IndexMap::new();
    for (row, value) in column.iter().enumerate() {
        groups.entry(value.key()).or_default().push(row);
    }
    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::Aggregation;
    use crate::error::FrameError;
    use crate::frame::DataFrame;
    use crate::series::Series;
    use crate::types::Value;

    fn fruits() -> DataFrame {
        DataFrame::from_columns(
            vec!["name", "price"],
            vec![
                vec![
                    "Orange".into(),
                    "Pamplemousse".into(),
                    "Rhubarbe".into(),
                    "Orange".into(),
                ],
                vec![15.0.into(), 1.34.into(), 2.34.into(), 15.0.into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn duplicate_key_collapses_to_one_row() {
        let grouped = fruits()
            .groupby(&["price"], &[("price", Aggregation::Min)])
            .unwrap();

        let expected = DataFrame::from_columns(
            vec!["price", "name"],
            vec![
                vec![15.0.into(), 1.34.into(), 2.34.into()],
                vec!["Orange".into(), "Pamplemousse".into(), "Rhubarbe".into()],
            ],
        )
        .unwrap();
        assert_eq!(grouped, expected);
    }

    #[test]
    fn aggregated_values_precede_singletons() {
        let df = DataFrame::from_series(vec![
            Series::new("k", ["a", "b", "a", "c", "b"]),
            Series::new("v", [1, 2, 3, 4, 5]),
        ])
        .unwrap();
        let grouped = df.groupby(&["k"], &[("k", Aggregation::Sum)]).unwrap();

        assert_eq!(grouped.columns(), vec!["k", "v"]);
        assert_eq!(grouped.column("k").unwrap(), &Series::new("k", ["a", "b", "c"]));
        // Groups a and b are summed in first-seen order, then c passes through.
        assert_eq!(grouped.column("v").unwrap(), &Series::new("v", [4, 7, 4]));
    }

    #[test]
    fn sum_concatenates_text_members() {
        let df = DataFrame::from_series(vec![
            Series::new("k", [1, 1, 2]),
            Series::new("label", ["x", "y", "z"]),
        ])
        .unwrap();
        let grouped = df.groupby(&["k"], &[("k", Aggregation::Sum)]).unwrap();
        assert_eq!(grouped.column("label").unwrap()[0], Value::from("xy"));
        assert_eq!(grouped.column("label").unwrap()[1], Value::from("z"));
    }

    #[test]
    fn count_and_mean_aggregations() {
        let df = DataFrame::from_series(vec![
            Series::new("k", [1, 1, 1, 2]),
            Series::new("v", [Some(2.0), None, Some(4.0), Some(9.0)]),
        ])
        .unwrap();

        let counted = df.groupby(&["k"], &[("k", Aggregation::Count)]).unwrap();
        assert_eq!(counted.column("v").unwrap()[0], Value::Integer(2));

        let averaged = df.groupby(&["k"], &[("k", Aggregation::Mean)]).unwrap();
        assert_eq!(averaged.column("v").unwrap()[0], Value::Float(3.0));
        assert_eq!(averaged.column("v").unwrap()[1], Value::Float(9.0));
    }

    #[test]
    fn all_null_group_aggregates_to_null() {
        let df = crate::ingestion::read_csv_from_str(
            "price,stock\n15.0,\n1.0,3\n15.0,\n",
            &crate::ingestion::CsvOptions::default(),
        )
        .unwrap();

        for aggregation in [
            Aggregation::Min,
            Aggregation::Max,
            Aggregation::Mean,
            Aggregation::Std,
            Aggregation::Sum,
        ] {
            let grouped = df.groupby(&["price"], &[("price", aggregation)]).unwrap();
            assert_eq!(grouped.count(), 2);
            assert_eq!(grouped.column("stock").unwrap()[0], Value::Null, "{aggregation}");
            assert_eq!(grouped.column("stock").unwrap()[1], Value::Integer(3));
        }

        let counted = df.groupby(&["price"], &[("price", Aggregation::Count)]).unwrap();
        assert_eq!(counted.column("stock").unwrap()[0], Value::Integer(0));
    }

    #[test]
    fn first_by_column_in_agg_selects_the_aggregator() {
        let df = DataFrame::from_series(vec![
            Series::new("a", [1, 1, 2]),
            Series::new("b", [7, 8, 9]),
            Series::new("v", [10, 20, 30]),
        ])
        .unwrap();
        let grouped = df
            .groupby(&["b", "a"], &[("a", Aggregation::Max), ("b", Aggregation::Min)])
            .unwrap();
        // "b" comes first in `by`, so every row is its own group.
        assert_eq!(grouped.columns(), vec!["b", "a", "v"]);
        assert_eq!(grouped.count(), 3);
        assert_eq!(grouped.column("v").unwrap(), &Series::new("v", [10, 20, 30]));
    }

    #[test]
    fn bad_arguments_are_rejected() {
        let df = fruits();
        assert!(matches!(
            df.groupby(&[], &[("price", Aggregation::Min)]).unwrap_err(),
            FrameError::InvalidArgument { .. }
        ));
        assert!(matches!(
            df.groupby(&["weight"], &[("weight", Aggregation::Min)]).unwrap_err(),
            FrameError::UnknownColumn { ref name } if name == "weight"
        ));
        assert!(matches!(
            df.groupby(&["price"], &[("name", Aggregation::Min)]).unwrap_err(),
            FrameError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn aggregation_parses_from_text() {
        assert_eq!("Min".parse::<Aggregation>().unwrap(), Aggregation::Min);
        assert_eq!(" count ".parse::<Aggregation>().unwrap(), Aggregation::Count);
        assert!(matches!(
            "median".parse::<Aggregation>().unwrap_err(),
            FrameError::InvalidArgument { .. }
        ));
        assert_eq!(Aggregation::Std.to_string(), "std");
    }
}
