//! `mybear` is a small in-memory, column-oriented table engine for exploratory work on CSV and JSON
//! data.
//!
//! A [`DataFrame`] is an ordered set of uniquely named, equally long [`Series`]. Cells are
//! [`Value`]s (integer, float, text, date or null). Frames are immutable: every operation returns
//! a new frame.
//!
//! ## Loading data
//!
//! Columns coming from files (or from [`DataFrame::from_columns`]/[`DataFrame::from_rows`]) are
//! type-coerced: each column takes its most frequent natural type and cells that cannot be
//! represented in it become nulls (see [`coercion`]).
//!
//! ```no_run
//! use mybear::ingestion::{read_from_path, ReadOptions};
//!
//! # fn main() -> Result<(), mybear::FrameError> {
//! // Format is detected from the extension (.csv/.tsv/.json).
//! let df = read_from_path("articles.csv", &ReadOptions::default())?;
//! println!("{df}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Working with frames
//!
//! ```rust
//! use mybear::{Aggregation, DataFrame, JoinHow, Series, Value};
//!
//! let fruits = DataFrame::from_series(vec![
//!     Series::new("name", ["Orange", "Pamplemousse", "Rhubarbe", "Orange"]),
//!     Series::new("price", [15.0, 1.34, 2.34, 15.0]),
//! ])
//! .unwrap();
//!
//! // Positional indexing: (index, index) is a scalar, (range, index) a series.
//! assert_eq!(fruits.iloc(1, 0).unwrap().into_scalar(), Some(Value::from("Pamplemousse")));
//! assert_eq!(fruits.iloc(0..2, 1).unwrap().into_series().unwrap().count(), 2);
//!
//! // Per-column reductions return one-row frames.
//! assert_eq!(fruits.max().unwrap().column("price").unwrap()[0], Value::Float(15.0));
//!
//! // Single-key grouping.
//! let grouped = fruits.groupby(&["price"], &[("price", Aggregation::Min)]).unwrap();
//! assert_eq!(grouped.count(), 3);
//!
//! // Key-based joins; shared column names get `_x`/`_y` suffixes.
//! let joined = fruits.join(&grouped, "name", "name", JoinHow::Inner).unwrap();
//! assert!(joined.columns().contains(&"price_y"));
//! ```
//!
//! ## Modules
//!
//! - [`frame`]: the [`DataFrame`] and its indexing, grouping, join and rendering
//! - [`series`]: the [`Series`] column type and its reductions
//! - [`types`]: [`Value`] and [`DType`]
//! - [`coercion`]: per-column type inference and casting
//! - [`ingestion`]: CSV/JSON readers and the path-based entry point
//! - [`error`]: the crate-wide [`FrameError`]

pub mod coercion;
pub mod error;
pub mod frame;
pub mod ingestion;
pub mod series;
pub mod types;

pub use error::{FrameError, FrameResult};
pub use frame::{Aggregation, DataFrame, JoinHow, JoinOn, RenderOptions, Selection, Selector};
pub use series::Series;
pub use types::{DType, Value};
