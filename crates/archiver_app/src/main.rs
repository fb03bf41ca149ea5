//! The archiver CLI: reads a URL list, archives every entry into the
//! categorized backup layout, and records failures in the error log.

mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{SecondsFormat, Utc};
use engine_logging::{engine_error, engine_info};

use archiver_core::parse_url_lines;
use archiver_engine::{
    Archiver, ErrorLog, FetchSettings, OutputLayout, ReqwestFetcher, RunSummary,
};

use crate::config::AppConfig;

/// Input candidates, probed in order.
const INPUT_CANDIDATES: [&str; 2] = ["urls.txt", "url.txt"];
/// Root of the categorized output tree.
const BACKUP_DIR: &str = "backup";

fn main() -> ExitCode {
    logging::initialize(logging::LogDestination::Terminal);

    let config = AppConfig::from_env();
    let layout = OutputLayout::new(BACKUP_DIR);
    let errors = Arc::new(ErrorLog::new(
        layout.error_log_path(),
        Arc::new(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    ));

    match run(&config, &layout, &errors) {
        Ok(summary) => {
            engine_info!(
                "Done: {} attempted, {} written, {} failed. Output: {}/",
                summary.attempted,
                summary.written,
                summary.failed,
                BACKUP_DIR
            );
            engine_info!("Error log (if any): {}", layout.error_log_path().display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let msg = format!("[FATAL] {err:#}");
            engine_error!("{}", msg);
            errors.append(&msg);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig, layout: &OutputLayout, errors: &Arc<ErrorLog>) -> Result<RunSummary> {
    layout
        .ensure_all()
        .context("prepare output directories")?;

    let input = resolve_input_file().ok_or_else(|| {
        anyhow!("no input file found; expected one of {INPUT_CANDIDATES:?} in the working directory")
    })?;
    let raw = std::fs::read_to_string(&input)
        .with_context(|| format!("read {}", input.display()))?;
    let urls = parse_url_lines(&raw);

    engine_info!("Total URLs: {} (source: {})", urls.len(), input.display());
    engine_info!(
        "Concurrency: {}, timeout: {}ms",
        config.concurrency,
        config.timeout.as_millis()
    );

    let fetcher = ReqwestFetcher::new(FetchSettings {
        timeout: config.timeout,
        ..FetchSettings::default()
    })
    .map_err(|err| anyhow!("build http client: {err}"))?;
    let archiver = Archiver::new(Arc::new(fetcher), layout.clone(), Arc::clone(errors));

    let runtime = tokio::runtime::Runtime::new().context("tokio runtime")?;
    Ok(runtime.block_on(archiver.run(urls, config.concurrency)))
}

fn resolve_input_file() -> Option<PathBuf> {
    INPUT_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|candidate| candidate.exists())
        .map(Path::to_path_buf)
}
