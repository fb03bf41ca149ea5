use std::collections::BTreeMap;
use std::path::PathBuf;

use engine_logging::{engine_error, engine_info};
use serde::Serialize;
use url::Url;

use archiver_core::UrlKind;

use crate::decode::decode_body;
use crate::errlog::ErrorLog;
use crate::fetch::Fetcher;
use crate::filename::{endpoint_slug, short_hash};
use crate::layout::OutputLayout;
use crate::persist::{unique_path, write_artifact};
use crate::types::{ArchiveError, FetchResult};

/// Metadata stored alongside a captured endpoint body.
#[derive(Debug, Serialize)]
struct CaptureMeta<'a> {
    url: &'a str,
    status: u16,
    #[serde(rename = "contentType")]
    content_type: &'a str,
    headers: &'a BTreeMap<String, String>,
}

/// Capture an endpoint response. Non-2xx statuses are logged but the
/// body is still written; JSON bodies get a pretty-printed envelope,
/// everything else a plain-text record.
pub async fn archive_endpoint(
    fetcher: &dyn Fetcher,
    layout: &OutputLayout,
    errors: &ErrorLog,
    url: &Url,
) -> Result<PathBuf, ArchiveError> {
    let result = fetcher.fetch(url).await?;

    if !result.is_success() {
        let msg = format!("[ENDPOINT] {} {}", result.status, url);
        engine_error!("{}", msg);
        errors.append(&msg);
    }

    let content_type = result.content_type();
    let decoded = decode_body(&result.body, result.header("content-type"));

    let slug = endpoint_slug(&format!("{}{}", url.host_str().unwrap_or(""), url.path()));
    let base = if slug.is_empty() {
        format!("endpoint_{}", short_hash(url.as_str()))
    } else {
        slug
    };
    let name_base = format!("{base}_response_{}", short_hash(url.as_str()));

    let payload = render_capture(url.as_str(), &result, &content_type, &decoded.text);
    let filename = format!("{name_base}.{}", payload.ext);
    let dir = layout.dir_for(UrlKind::Endpoint);
    let path = unique_path(&dir, &filename, url.as_str());
    write_artifact(&path, payload.contents.as_bytes())?;

    engine_info!("[OK][endpoint] {} -> {}", url, path.display());
    Ok(path)
}

struct CapturePayload {
    ext: &'static str,
    contents: String,
}

fn render_capture(
    url: &str,
    result: &FetchResult,
    content_type: &str,
    text: &str,
) -> CapturePayload {
    if looks_like_json(content_type, text) {
        if let Ok(body) = serde_json::from_str::<serde_json::Value>(text) {
            let envelope = serde_json::json!({
                "meta": CaptureMeta {
                    url,
                    status: result.status,
                    content_type,
                    headers: &result.headers,
                },
                "body": body,
            });
            if let Ok(pretty) = serde_json::to_string_pretty(&envelope) {
                return CapturePayload {
                    ext: "json",
                    contents: pretty,
                };
            }
        }
        // Heuristic matched but the body did not parse: fall through.
    }
    CapturePayload {
        ext: "txt",
        contents: render_text_capture(url, result.status, content_type, text),
    }
}

/// JSON when the media type says so or the body reads like a JSON
/// document.
fn looks_like_json(content_type: &str, text: &str) -> bool {
    let media_type = content_type.split(';').next().unwrap_or(content_type).trim();
    if media_type.contains("application/json") || media_type.ends_with("+json") {
        return true;
    }
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn render_text_capture(url: &str, status: u16, content_type: &str, text: &str) -> String {
    let ct = if content_type.is_empty() { "-" } else { content_type };
    format!("URL: {url}\nStatus: {status}\nContent-Type: {ct}\n\n----- BODY -----\n{text}\n")
}
