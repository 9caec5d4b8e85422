//! A single named column of values.

use std::ops::{Index, Range};

use crate::coercion;
use crate::error::{FrameError, FrameResult};
use crate::frame::{Selection, Selector};
use crate::types::{DType, Value};

/// An ordered, optionally named column of [`Value`]s with an implicit `0..len` positional index.
///
/// A `Series` is immutable once built; operations return new instances. Two series are equal when
/// their names are equal and their values are element-wise equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: Option<String>,
    data: Vec<Value>,
}

impl Series {
    /// Create a named series from anything convertible into [`Value`]s.
    ///
    /// ```rust
    /// use mybear::Series;
    ///
    /// let from_range = Series::new("a", 0..5);
    /// let from_list = Series::new("a", vec![0, 1, 2, 3, 4]);
    /// assert_eq!(from_range, from_list);
    /// assert_eq!(from_range.count(), 5);
    /// ```
    pub fn new<I, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: Some(name.into()),
            data: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a series without a name.
    pub fn unnamed<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            name: None,
            data: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a series from an already built value vector.
    pub fn from_values(name: Option<String>, data: Vec<Value>) -> Self {
        Self { name, data }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return the same values under a new name.
    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            data: self.data,
        }
    }

    pub fn data(&self) -> &[Value] {
        &self.data
    }

    pub fn into_values(self) -> Vec<Value> {
        self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of elements, nulls included.
    pub fn count(&self) -> usize {
        self.data.len()
    }

    /// Number of null elements.
    pub fn null_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_null()).count()
    }

    /// The implicit positional index, always `0..len`.
    pub fn index(&self) -> Range<usize> {
        0..self.data.len()
    }

    /// Summary type of the non-null values.
    ///
    /// Integer/Float mixes report [`DType::Float`]; an empty or all-null series reports
    /// [`DType::Null`]; any other mix reports [`DType::Mixed`].
    pub fn dtype(&self) -> DType {
        let mut current: Option<DType> = None;
        for value in self.data.iter().filter(|v| !v.is_null()) {
            let t = value.dtype();
            current = match current {
                None => Some(t),
                Some(c) if c == t => Some(c),
                Some(c) if c.is_numeric() && t.is_numeric() => Some(DType::Float),
                Some(_) => return DType::Mixed,
            };
        }
        current.unwrap_or(DType::Null)
    }

    /// Run type coercion over the values, keeping the name.
    pub fn coerced(self) -> Self {
        Self {
            name: self.name,
            data: coercion::coerce(self.data),
        }
    }

    /// Position-based access; returns `self` so `s.iloc()[i]` reads like `s[i]`.
    pub fn iloc(&self) -> &Self {
        self
    }

    /// Value at position `index`.
    pub fn get(&self, index: usize) -> FrameResult<&Value> {
        self.data.get(index).ok_or(FrameError::IndexOutOfRange {
            index,
            len: self.data.len(),
        })
    }

    /// Half-open slice of the series, keeping its name. Bounds past the end are clamped.
    pub fn slice(&self, range: Range<usize>) -> FrameResult<Self> {
        let range = Selector::clamp_range(&range, self.data.len())?;
        Ok(Self {
            name: self.name.clone(),
            data: self.data[range].to_vec(),
        })
    }

    /// Dispatch on a [`Selector`]: an index yields a scalar, a range yields a series.
    pub fn select(&self, selector: impl Into<Selector>) -> FrameResult<Selection> {
        match selector.into() {
            Selector::Index(i) => self.get(i).cloned().map(Selection::Scalar),
            Selector::Range(r) => self.slice(r).map(Selection::Series),
        }
    }

    /// Smallest non-null value in the column's natural order.
    pub fn min(&self) -> FrameResult<Value> {
        self.extreme("min", std::cmp::Ordering::Less)
    }

    /// Largest non-null value in the column's natural order.
    pub fn max(&self) -> FrameResult<Value> {
        self.extreme("max", std::cmp::Ordering::Greater)
    }

    /// Arithmetic mean of the non-null values.
    pub fn mean(&self) -> FrameResult<f64> {
        let nums = self.numeric_values("mean")?;
        Ok(nums.iter().sum::<f64>() / nums.len() as f64)
    }

    /// Population standard deviation of the non-null values.
    pub fn std(&self) -> FrameResult<f64> {
        let nums = self.numeric_values("std")?;
        let n = nums.len() as f64;
        let mean = nums.iter().sum::<f64>() / n;
        let sum_sq: f64 = nums.iter().map(|x| (x - mean).powi(2)).sum();
        Ok((sum_sq / n).sqrt())
    }

    /// Sum of the non-null values.
    ///
    /// Integer columns sum to an integer (falling back to a float on overflow), float columns to a
    /// float and text columns concatenate. An empty column sums to `Integer(0)`.
    pub fn sum(&self) -> FrameResult<Value> {
        let present = self.data.iter().filter(|v| !v.is_null());
        match self.dtype() {
            DType::Null => Ok(Value::Integer(0)),
            DType::Integer => {
                let mut acc: i64 = 0;
                for value in present {
                    if let Value::Integer(v) = value {
                        match acc.checked_add(*v) {
                            Some(next) => acc = next,
                            None => return Ok(Value::Float(self.float_sum())),
                        }
                    }
                }
                Ok(Value::Integer(acc))
            }
            DType::Float => Ok(Value::Float(self.float_sum())),
            DType::Text => Ok(Value::Text(
                present.filter_map(Value::as_str).collect::<String>(),
            )),
            dtype => Err(self.non_numeric("sum", dtype)),
        }
    }

    fn float_sum(&self) -> f64 {
        self.data.iter().filter_map(Value::as_f64).sum()
    }

    fn extreme(&self, operation: &'static str, pick: std::cmp::Ordering) -> FrameResult<Value> {
        match self.dtype() {
            DType::Null => return Err(self.empty(operation)),
            DType::Mixed => return Err(self.non_numeric(operation, DType::Mixed)),
            _ => {}
        }

        let mut best: Option<&Value> = None;
        for value in self.data.iter().filter(|v| !v.is_null()) {
            best = match best {
                Some(b) if value.partial_cmp(b) != Some(pick) => Some(b),
                _ => Some(value),
            };
        }
        best.cloned().ok_or_else(|| self.empty(operation))
    }

    fn numeric_values(&self, operation: &'static str) -> FrameResult<Vec<f64>> {
        match self.dtype() {
            DType::Null => Err(self.empty(operation)),
            DType::Integer | DType::Float => {
                Ok(self.data.iter().filter_map(Value::as_f64).collect())
            }
            dtype => Err(self.non_numeric(operation, dtype)),
        }
    }

    fn empty(&self, operation: &'static str) -> FrameError {
        FrameError::EmptyCollection {
            column: self.name.clone(),
            operation,
        }
    }

    fn non_numeric(&self, operation: &'static str, dtype: DType) -> FrameError {
        FrameError::NonNumeric {
            column: self.name.clone(),
            dtype,
            operation,
        }
    }
}

impl Index<usize> for Series {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if `index >= len`; use [`Series::get`] for a checked lookup.
    fn index(&self, index: usize) -> &Value {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
