//! Path-based entry point.
//!
//! [`read_from_path`] picks the reader from [`ReadOptions::format`] or, when that is `None`, from
//! the file extension, then reports the outcome to the configured [`ReadObserver`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{FrameError, FrameResult};
use crate::frame::DataFrame;

use super::csv::{self, CsvOptions};
use super::json::{self, JsonOrient};
use super::observability::{ReadContext, ReadObserver, ReadSeverity, ReadStats};

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFormat {
    /// Delimited text; `.tsv` files are read with a tab delimiter.
    Csv,
    Json,
}

impl ReadFormat {
    /// Format for a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" | "tsv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options for [`read_from_path`]. Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ReadOptions {
    /// If `None`, the format is inferred from the file extension.
    pub format: Option<ReadFormat>,
    pub csv: CsvOptions,
    pub orient: JsonOrient,
    pub observer: Option<Arc<dyn ReadObserver>>,
    /// Failures at or above this severity also trigger `on_alert`.
    pub alert_at_or_above: ReadSeverity,
}

impl fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOptions")
            .field("format", &self.format)
            .field("csv", &self.csv)
            .field("orient", &self.orient)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            format: None,
            csv: CsvOptions::default(),
            orient: JsonOrient::default(),
            observer: None,
            alert_at_or_above: ReadSeverity::Critical,
        }
    }
}

/// Read a CSV or JSON file into a [`DataFrame`].
///
/// When an observer is configured it receives `on_success` with the frame's shape, or
/// `on_failure` with the severity from [`ReadSeverity::for_error`], followed by `on_alert` when
/// that severity is at least `options.alert_at_or_above`. A path whose format cannot be inferred
/// fails before any observer call.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use mybear::ingestion::{read_from_path, ReadOptions, ReadSeverity, TracingObserver};
///
/// # fn main() -> Result<(), mybear::FrameError> {
/// let options = ReadOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: ReadSeverity::Error,
///     ..Default::default()
/// };
/// let df = read_from_path("articles.csv", &options)?;
/// println!("{df}");
/// # Ok(())
/// # }
/// ```
pub fn read_from_path(path: impl AsRef<Path>, options: &ReadOptions) -> FrameResult<DataFrame> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = ReadContext {
        path: path.to_path_buf(),
        format,
    };

    let result = match format {
        ReadFormat::Csv => {
            let csv_options = if has_extension(path, "tsv") {
                CsvOptions {
                    delimiter: b'\t',
                    ..options.csv
                }
            } else {
                options.csv
            };
            csv::read_csv_from_path(path, &csv_options)
        }
        ReadFormat::Json => json::read_json_from_path(path, options.orient),
    };

    match &result {
        Ok(df) => tracing::info!(
            path = %path.display(),
            rows = df.count(),
            columns = df.width(),
            "read frame"
        ),
        Err(e) => tracing::debug!(path = %path.display(), error = %e, "read failed"),
    }

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(df) => obs.on_success(
                &ctx,
                ReadStats {
                    rows: df.count(),
                    columns: df.width(),
                },
            ),
            Err(e) => {
                let severity = ReadSeverity::for_error(e);
                obs.on_failure(&ctx, severity, e);
                if severity >= options.alert_at_or_above {
                    obs.on_alert(&ctx, severity, e);
                }
            }
        }
    }

    result
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn infer_format_from_path(path: &Path) -> FrameResult<ReadFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| {
            FrameError::invalid_argument(format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ))
        })?;

    ReadFormat::from_extension(ext).ok_or_else(|| {
        FrameError::invalid_argument(format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ))
    })
}

/// An owned read request, for callers that queue reads.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    pub path: PathBuf,
    pub options: ReadOptions,
}

impl ReadRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: ReadOptions::default(),
        }
    }

    /// Execute the request with [`read_from_path`].
    pub fn run(&self) -> FrameResult<DataFrame> {
        read_from_path(&self.path, &self.options)
    }
}
