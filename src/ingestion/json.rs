//! JSON reader.
//!
//! Two layouts are accepted:
//! - `records`: an array of objects, one per row: `[{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]`
//! - `columns`: an object of columns, each an object from row label to value:
//!   `{"a": {"0": 1, "1": 2}, "b": {"0": "x", "1": "y"}}`
//!
//! Keys missing from some rows (or labels missing from some columns) are filled with nulls.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{FrameError, FrameResult};
use crate::frame::DataFrame;
use crate::types::Value;

/// Layout of a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonOrient {
    /// Array of row objects.
    #[default]
    Records,
    /// Object of column objects.
    Columns,
}

impl fmt::Display for JsonOrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Records => "records",
            Self::Columns => "columns",
        })
    }
}

impl FromStr for JsonOrient {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "records" => Ok(Self::Records),
            "columns" => Ok(Self::Columns),
            other => {
                tracing::error!(orient = other, "unsupported json orient");
                Err(FrameError::UnsupportedOrient {
                    orient: other.to_owned(),
                })
            }
        }
    }
}

/// Read a JSON file into a [`DataFrame`].
pub fn read_json_from_path(path: impl AsRef<Path>, orient: JsonOrient) -> FrameResult<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::error!(path = %path.display(), "json file not found");
        return Err(FrameError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(path = %path.display(), %orient, "reading json");
    let text = fs::read_to_string(path)?;
    read_json_from_str(&text, orient)
}

/// Read a JSON document held in memory.
pub fn read_json_from_str(input: &str, orient: JsonOrient) -> FrameResult<DataFrame> {
    let document: JsonValue = serde_json::from_str(input)?;
    match orient {
        JsonOrient::Records => from_records(document),
        JsonOrient::Columns => from_columns(document),
    }
}

fn from_records(document: JsonValue) -> FrameResult<DataFrame> {
    let JsonValue::Array(items) = document else {
        return Err(FrameError::malformed(
            "records orient expects an array of objects",
        ));
    };

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            JsonValue::Object(map) => Ok(map),
            _ => Err(FrameError::malformed(format!("record {i} is not an object"))),
        })
        .collect::<FrameResult<Vec<Map<String, JsonValue>>>>()?;

    let mut names: IndexSet<&str> = IndexSet::new();
    for row in &rows {
        names.extend(row.keys().map(String::as_str));
    }

    let data: Vec<Vec<Value>> = names
        .iter()
        .map(|name| {
            rows.iter()
                .map(|row| row.get(*name).map_or(Value::Null, cell))
                .collect()
        })
        .collect();
    DataFrame::from_columns(names.into_iter().collect(), data)
}

fn from_columns(document: JsonValue) -> FrameResult<DataFrame> {
    let JsonValue::Object(columns) = document else {
        return Err(FrameError::malformed(
            "columns orient expects an object of columns",
        ));
    };

    let mut labelled: Vec<(String, IndexMap<String, Value>)> = Vec::with_capacity(columns.len());
    for (name, column) in columns {
        let cells: IndexMap<String, Value> = match column {
            JsonValue::Object(map) => map.iter().map(|(label, v)| (label.clone(), cell(v))).collect(),
            JsonValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), cell(v)))
                .collect(),
            _ => {
                return Err(FrameError::malformed(format!(
                    "column '{name}' is not an object or an array"
                )));
            }
        };
        labelled.push((name, cells));
    }

    let mut labels: IndexSet<String> = IndexSet::new();
    for (_, cells) in &labelled {
        labels.extend(cells.keys().cloned());
    }

    let mut names: Vec<String> = Vec::with_capacity(labelled.len());
    let mut data: Vec<Vec<Value>> = Vec::with_capacity(labelled.len());
    for (name, mut cells) in labelled {
        data.push(
            labels
                .iter()
                .map(|label| cells.swap_remove(label).unwrap_or(Value::Null))
                .collect(),
        );
        names.push(name);
    }
    DataFrame::from_columns(names, data)
}

fn cell(value: &JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Text(b.to_string()),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => n.as_f64().map_or(Value::Null, Value::Float),
        },
        JsonValue::String(s) => Value::Text(s.clone()),
        nested @ (JsonValue::Array(_) | JsonValue::Object(_)) => Value::Text(nested.to_string()),
    }
}
