use std::fmt;

use url::Url;

/// Content category assigned to a URL before it is fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlKind {
    Script,
    Stylesheet,
    Image,
    Endpoint,
    Other,
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UrlKind::Script => "js",
            UrlKind::Stylesheet => "css",
            UrlKind::Image => "images",
            UrlKind::Endpoint => "endpoint",
            UrlKind::Other => "others",
        };
        f.write_str(label)
    }
}

/// Category plus the path extension it was derived from. Computed once
/// per URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: UrlKind,
    pub ext: Option<String>,
}

const IMAGE_EXTS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp"];

/// Extension of the URL path's last segment, lower-cased and including
/// the leading dot. `None` when the segment has no dot or only a
/// leading one.
pub fn path_extension(url: &Url) -> Option<String> {
    let segment = url.path().rsplit('/').next().unwrap_or("");
    let idx = segment.rfind('.')?;
    if idx == 0 {
        return None;
    }
    Some(segment[idx..].to_ascii_lowercase())
}

/// Total classification over the closed set of kinds. Extension rules
/// first, then the endpoint rule (extensionless URLs and anything
/// mentioning `cloudfunctions`), then the static fallback.
pub fn classify(url: &Url) -> Classification {
    let ext = path_extension(url);
    let kind = match ext.as_deref() {
        Some(".js") => UrlKind::Script,
        Some(".css") => UrlKind::Stylesheet,
        Some(e) if IMAGE_EXTS.contains(&e) => UrlKind::Image,
        None => UrlKind::Endpoint,
        Some(_) if url.as_str().to_ascii_lowercase().contains("cloudfunctions") => {
            UrlKind::Endpoint
        }
        Some(_) => UrlKind::Other,
    };
    Classification { kind, ext }
}
