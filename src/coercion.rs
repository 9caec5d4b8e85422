//! Column type coercion.
//!
//! Ingested columns arrive as text (or as a mix of natively typed values). Before reductions can be
//! type-safe every column is given one working type:
//!
//! 1. each element's *natural* type is detected ([`natural_type`]): a `D{1,2}-D{1,2}-D{4}` date
//!    first, then an integer (`-?digits`), then a float (`-?digits.digits`), else text;
//! 2. the most frequent non-null natural type wins ([`dominant_type`]); ties go to the type that
//!    was encountered first;
//! 3. every element is cast to that type ([`cast_value`]). Dates always become dates. A cell that
//!    cannot be represented in the dominant type becomes [`Value::Null`] instead of failing the
//!    whole column.
//!
//! Running [`coerce`] on an already coerced column is a no-op.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::{DType, Value};

/// Day-month-year layout accepted for date cells (e.g. `7-3-2021`, `07-03-2021`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$")
        .unwrap_or_else(|e| panic!("BUG: invalid date pattern: {e}"))
});

static INTEGER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+$").unwrap_or_else(|e| panic!("BUG: invalid integer pattern: {e}"))
});

static FLOAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d*\.\d+$").unwrap_or_else(|e| panic!("BUG: invalid float pattern: {e}"))
});

/// Detect the natural type of a single value.
///
/// Natively typed values report their own tag; text is classified by trial against the date,
/// integer and float patterns (in that order).
pub fn natural_type(value: &Value) -> DType {
    match value {
        Value::Text(s) => {
            let s = s.trim();
            if DATE_PATTERN.is_match(s) {
                DType::Date
            } else if INTEGER_PATTERN.is_match(s) {
                DType::Integer
            } else if FLOAT_PATTERN.is_match(s) {
                DType::Float
            } else {
                DType::Text
            }
        }
        other => other.dtype(),
    }
}

/// Plurality type of a column, ignoring nulls.
///
/// Returns `None` when the column has no non-null value.
pub fn dominant_type(values: &[Value]) -> Option<DType> {
    // Tally in first-encountered order so ties resolve to the earliest type.
    let mut tally: Vec<(DType, usize)> = Vec::new();
    for value in values {
        let dtype = natural_type(value);
        if dtype == DType::Null {
            continue;
        }
        match tally.iter_mut().find(|(t, _)| *t == dtype) {
            Some((_, n)) => *n += 1,
            None => tally.push((dtype, 1)),
        }
    }

    let mut best: Option<(DType, usize)> = None;
    for (dtype, n) in tally {
        if best.is_none_or(|(_, m)| n > m) {
            best = Some((dtype, n));
        }
    }
    best.map(|(dtype, _)| dtype)
}

/// Cast one value to `target`, falling back to [`Value::Null`] when it cannot be represented.
pub fn cast_value(value: &Value, target: DType) -> Value {
    if let Value::Text(s) = value {
        let trimmed = s.trim();
        if DATE_PATTERN.is_match(trimmed) {
            return parse_date(trimmed).map_or(Value::Null, Value::Date);
        }
    }

    match (value, target) {
        (Value::Null, _) => Value::Null,
        (Value::Date(d), _) => Value::Date(*d),

        (Value::Integer(v), DType::Integer) => Value::Integer(*v),
        (Value::Float(v), DType::Integer) => float_to_integer(*v),
        (Value::Text(s), DType::Integer) => s
            .trim()
            .parse::<i64>()
            .map_or(Value::Null, Value::Integer),

        (Value::Integer(v), DType::Float) => Value::Float(*v as f64),
        (Value::Float(v), DType::Float) => Value::Float(*v),
        (Value::Text(s), DType::Float) => s.trim().parse::<f64>().map_or(Value::Null, Value::Float),

        (Value::Text(s), DType::Text) => Value::Text(s.clone()),
        (other, DType::Text) => Value::Text(other.to_string()),

        (_, DType::Date) => Value::Null,
        (other, DType::Null | DType::Mixed) => other.clone(),
    }
}

/// Coerce a column to its dominant type.
pub fn coerce(values: Vec<Value>) -> Vec<Value> {
    let Some(target) = dominant_type(&values) else {
        return values;
    };

    let mut nulled = 0usize;
    let out: Vec<Value> = values
        .iter()
        .map(|v| {
            let cast = cast_value(v, target);
            if cast.is_null() && !v.is_null() {
                nulled += 1;
            }
            cast
        })
        .collect();

    tracing::debug!(dominant = %target, len = out.len(), "coerced column");
    if nulled > 0 {
        tracing::warn!(
            dominant = %target,
            nulled,
            "cells could not be cast to the dominant type and were replaced by null"
        );
    }
    out
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

// Truncates toward zero like an integer constructor would; non-finite values have no integer form.
fn float_to_integer(v: f64) -> Value {
    if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Value::Integer(v.trunc() as i64)
    } else {
        Value::Null
    }
}
