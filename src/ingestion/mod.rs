//! File readers that build a [`crate::DataFrame`].
//!
//! Most callers should use [`read_from_path`] (from [`unified`]), which:
//!
//! - detects the format from the file extension (or takes it from [`ReadOptions`])
//! - reads the file into a type-coerced [`crate::DataFrame`]
//! - optionally reports success/failure/alerts to a [`ReadObserver`]
//!
//! Format-specific functions live in [`csv`] and [`json`].

pub mod csv;
pub mod json;
pub mod observability;
pub mod unified;

pub use csv::{CsvOptions, read_csv_from_path, read_csv_from_reader, read_csv_from_str};
pub use json::{JsonOrient, read_json_from_path, read_json_from_str};
pub use observability::{
    CompositeObserver, FileObserver, ReadContext, ReadObserver, ReadSeverity, ReadStats,
    TracingObserver,
};
pub use unified::{ReadFormat, ReadOptions, ReadRequest, read_from_path};
