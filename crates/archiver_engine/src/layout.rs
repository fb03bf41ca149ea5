use std::path::{Path, PathBuf};

use archiver_core::UrlKind;

use crate::persist::{ensure_output_dir, PersistError};

/// Categorized on-disk output tree rooted at the backup directory.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Category directory for a classification kind.
    pub fn dir_for(&self, kind: UrlKind) -> PathBuf {
        let name = match kind {
            UrlKind::Script => "js",
            UrlKind::Stylesheet => "css",
            UrlKind::Image => "images",
            UrlKind::Endpoint => "endpoints",
            UrlKind::Other => "others",
        };
        self.root.join(name)
    }

    /// The shared append-only error log at the output root.
    pub fn error_log_path(&self) -> PathBuf {
        self.root.join("error.log")
    }

    /// Create every category directory up front so workers never race
    /// on first use.
    pub fn ensure_all(&self) -> Result<(), PersistError> {
        for kind in [
            UrlKind::Script,
            UrlKind::Stylesheet,
            UrlKind::Image,
            UrlKind::Endpoint,
            UrlKind::Other,
        ] {
            ensure_output_dir(&self.dir_for(kind))?;
        }
        Ok(())
    }
}
