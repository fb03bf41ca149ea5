use std::path::PathBuf;

use engine_logging::{engine_error, engine_info};
use url::Url;

use archiver_core::Classification;

use crate::errlog::ErrorLog;
use crate::fetch::Fetcher;
use crate::filename::filename_from_url;
use crate::layout::OutputLayout;
use crate::persist::{unique_path, write_artifact};
use crate::types::ArchiveError;

/// Download a static asset and write its raw bytes into the category
/// directory. Non-2xx responses are logged and produce no file.
pub async fn archive_asset(
    fetcher: &dyn Fetcher,
    layout: &OutputLayout,
    errors: &ErrorLog,
    url: &Url,
    classification: &Classification,
) -> Result<Option<PathBuf>, ArchiveError> {
    let result = fetcher.fetch(url).await?;

    if !result.is_success() {
        let msg = format!("[STATIC] {} {}", result.status, url);
        engine_error!("{}", msg);
        errors.append(&msg);
        return Ok(None);
    }

    let dir = layout.dir_for(classification.kind);
    let filename = filename_from_url(url, classification.ext.as_deref());
    let path = unique_path(&dir, &filename, url.as_str());
    write_artifact(&path, &result.body)?;

    engine_info!("[OK][{}] {} -> {}", classification.kind, url, path.display());
    Ok(Some(path))
}
