use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use engine_logging::engine_warn;

/// Timestamp source injected by the application.
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

/// Process-wide append-only error log. The file is opened lazily on
/// the first append; each record is one full line written under the
/// lock, so concurrent workers never interleave within a line.
pub struct ErrorLog {
    path: PathBuf,
    timestamp: TimestampFn,
    file: Mutex<Option<File>>,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>, timestamp: TimestampFn) -> Self {
        Self {
            path: path.into(),
            timestamp,
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `[<timestamp>] <message>`. Best effort: a sink failure
    /// is reported to the process log and never reaches the workers.
    pub fn append(&self, message: &str) {
        let line = format!("[{}] {}\n", (self.timestamp)(), message);

        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if guard.is_none() {
            match self.open() {
                Ok(file) => *guard = Some(file),
                Err(err) => {
                    engine_warn!("error log unavailable at {}: {}", self.path.display(), err);
                    return;
                }
            }
        }
        if let Some(file) = guard.as_mut() {
            if let Err(err) = file.write_all(line.as_bytes()) {
                engine_warn!("error log append failed: {}", err);
            }
        }
    }

    fn open(&self) -> std::io::Result<File> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}
