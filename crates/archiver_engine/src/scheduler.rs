use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use engine_logging::engine_error;
use url::Url;

use archiver_core::{classify, UrlKind};

use crate::asset::archive_asset;
use crate::endpoint::archive_endpoint;
use crate::errlog::ErrorLog;
use crate::fetch::Fetcher;
use crate::layout::OutputLayout;
use crate::types::ArchiveError;

/// Counts for one completed run. Every input entry is attempted
/// exactly once; `written` counts entries that produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub written: usize,
    pub failed: usize,
}

/// Batch archiver: owns the fetcher, output layout and error sink
/// shared by every worker.
#[derive(Clone)]
pub struct Archiver {
    fetcher: Arc<dyn Fetcher>,
    layout: OutputLayout,
    errors: Arc<ErrorLog>,
}

impl Archiver {
    pub fn new(fetcher: Arc<dyn Fetcher>, layout: OutputLayout, errors: Arc<ErrorLog>) -> Self {
        Self {
            fetcher,
            layout,
            errors,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Drain `urls` with a fixed pool of `workers` tasks sharing one
    /// cursor. A worker finishes its current URL, success or logged
    /// failure, before taking the next index; the call returns once
    /// every entry has been attempted.
    pub async fn run(&self, urls: Vec<String>, workers: usize) -> RunSummary {
        let attempted = urls.len();
        let urls = Arc::new(urls);
        let cursor = Arc::new(AtomicUsize::new(0));
        let written = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(workers.max(1));
        for _ in 0..workers.max(1) {
            let archiver = self.clone();
            let urls = Arc::clone(&urls);
            let cursor = Arc::clone(&cursor);
            let written = Arc::clone(&written);
            handles.push(tokio::spawn(async move {
                loop {
                    let index = cursor.fetch_add(1, Ordering::SeqCst);
                    if index >= urls.len() {
                        break;
                    }
                    if archiver.process_one(&urls[index]).await {
                        written.fetch_add(1, Ordering::SeqCst);
                    }
                }
            }));
        }
        for handle in handles {
            let _ = handle.await;
        }

        let written = written.load(Ordering::SeqCst);
        RunSummary {
            attempted,
            written,
            failed: attempted - written,
        }
    }

    /// One URL, one outcome: parse, classify, dispatch. Every failure
    /// is converted into an error log record here and never escapes.
    /// Returns whether an artifact was written.
    async fn process_one(&self, raw: &str) -> bool {
        let url = match Url::parse(raw) {
            Ok(url) => url,
            Err(err) => {
                let msg = format!("[INVALID_URL] {raw} ({err})");
                engine_error!("{}", msg);
                self.errors.append(&msg);
                return false;
            }
        };

        let classification = classify(&url);
        let outcome: Result<Option<PathBuf>, ArchiveError> = match classification.kind {
            UrlKind::Endpoint => {
                archive_endpoint(self.fetcher.as_ref(), &self.layout, &self.errors, &url)
                    .await
                    .map(Some)
            }
            _ => {
                archive_asset(
                    self.fetcher.as_ref(),
                    &self.layout,
                    &self.errors,
                    &url,
                    &classification,
                )
                .await
            }
        };

        match outcome {
            Ok(path) => path.is_some(),
            Err(err) => {
                let msg = format!("[FAILED] {raw} ({err})");
                engine_error!("{}", msg);
                self.errors.append(&msg);
                false
            }
        }
    }
}
