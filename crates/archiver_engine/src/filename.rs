use sha2::{Digest, Sha256};
use url::Url;

/// First 10 hex characters of the SHA-256 of `input`.
pub fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(10);
    for byte in digest.iter().take(5) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}

/// Filename for a static asset: the percent-decoded last path segment,
/// sanitized, with the classification extension appended when the
/// segment carries none. URLs ending in a directory get a synthesized
/// `file_<hash>` name.
pub fn filename_from_url(url: &Url, fallback_ext: Option<&str>) -> String {
    let last = url
        .path()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("")
        .to_string();

    if last.is_empty() {
        let ext = fallback_ext.unwrap_or("");
        return format!("file_{}{}", short_hash(url.as_str()), ext);
    }

    // Keep the raw segment when the percent-encoding is malformed.
    let decoded = match urlencoding::decode(&last) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => last.clone(),
    };

    let mut name: String = decoded
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    if !has_extension(&name) {
        if let Some(ext) = fallback_ext {
            name.push_str(ext);
        }
    }
    name
}

/// Lower-cased slug for endpoint capture names: scheme stripped,
/// non-alphanumeric runs collapsed to single hyphens, trimmed, capped
/// at 140 characters.
pub fn endpoint_slug(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = lowered.replace("https://", "").replace("http://", "");

    let mut slug = String::with_capacity(stripped.len());
    let mut prev_hyphen = false;
    for c in stripped.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }

    let mut capped = slug.trim_matches('-').to_string();
    // Slugs are ASCII by construction, so the cap cannot split a char.
    capped.truncate(140);
    capped
}

fn has_extension(name: &str) -> bool {
    name.rfind('.').is_some_and(|idx| idx > 0)
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
