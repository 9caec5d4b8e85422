use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use crate::error::FrameError;

use super::unified::ReadFormat;

/// Severity of a read outcome, used for observer callbacks and the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadSeverity {
    Info,
    Warning,
    /// The read failed on its input.
    Error,
    /// The read failed on infrastructure (missing file, I/O).
    Critical,
}

impl ReadSeverity {
    /// Classify a read failure.
    pub fn for_error(error: &FrameError) -> Self {
        match error {
            FrameError::Io(_) | FrameError::FileNotFound { .. } => Self::Critical,
            FrameError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            FrameError::Json(err) if err.is_io() => Self::Critical,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for ReadSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

/// The file being read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadContext {
    pub path: PathBuf,
    pub format: ReadFormat,
}

/// Shape of a successfully read frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    pub rows: usize,
    pub columns: usize,
}

/// Receives the outcome of every path-based read.
pub trait ReadObserver: Send + Sync {
    fn on_success(&self, _ctx: &ReadContext, _stats: ReadStats) {}

    fn on_failure(&self, _ctx: &ReadContext, _severity: ReadSeverity, _error: &FrameError) {}

    /// Called after [`Self::on_failure`] when the severity meets the alert threshold.
    ///
    /// Forwards to [`Self::on_failure`] unless overridden.
    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Fans every callback out to a list of observers, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ReadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ReadObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ReadObserver for CompositeObserver {
    fn on_success(&self, ctx: &ReadContext, stats: ReadStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards read outcomes to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ReadObserver for TracingObserver {
    fn on_success(&self, ctx: &ReadContext, stats: ReadStats) {
        tracing::info!(
            format = ?ctx.format,
            path = %ctx.path.display(),
            rows = stats.rows,
            columns = stats.columns,
            "read succeeded"
        );
    }

    fn on_failure(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        tracing::warn!(
            %severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "read failed"
        );
    }

    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        tracing::error!(
            %severity,
            format = ?ctx.format,
            path = %ctx.path.display(),
            %error,
            "read alert"
        );
    }
}

/// Appends one line per read outcome to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Writes are best-effort; a log file that cannot be opened is skipped silently.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ReadObserver for FileObserver {
    fn on_success(&self, ctx: &ReadContext, stats: ReadStats) {
        self.append_line(&format!(
            "{} ok format={:?} path={} rows={} columns={}",
            unix_ts(),
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.columns
        ));
    }

    fn on_failure(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.append_line(&format!(
            "{} fail severity={severity} format={:?} path={} err={error}",
            unix_ts(),
            ctx.format,
            ctx.path.display(),
        ));
    }

    fn on_alert(&self, ctx: &ReadContext, severity: ReadSeverity, error: &FrameError) {
        self.append_line(&format!(
            "{} ALERT severity={severity} format={:?} path={} err={error}",
            unix_ts(),
            ctx.format,
            ctx.path.display(),
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::ReadSeverity;
    use crate::error::FrameError;

    #[test]
    fn missing_files_and_io_are_critical() {
        let missing = FrameError::FileNotFound {
            path: PathBuf::from("nope.csv"),
        };
        assert_eq!(ReadSeverity::for_error(&missing), ReadSeverity::Critical);

        let io = FrameError::Io(std::io::Error::other("disk"));
        assert_eq!(ReadSeverity::for_error(&io), ReadSeverity::Critical);
    }

    #[test]
    fn input_problems_are_errors() {
        let err = FrameError::Malformed {
            message: "bad".to_string(),
        };
        assert_eq!(ReadSeverity::for_error(&err), ReadSeverity::Error);
        assert!(ReadSeverity::Error < ReadSeverity::Critical);
        assert!(ReadSeverity::Info < ReadSeverity::Warning);
    }
}
