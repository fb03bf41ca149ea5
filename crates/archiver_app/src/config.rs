use std::time::Duration;

/// Worker pool size when `CONCURRENCY` is absent or invalid.
pub const DEFAULT_CONCURRENCY: usize = 5;
/// Per-fetch timeout when `TIMEOUT_MS` is absent or invalid.
pub const DEFAULT_TIMEOUT_MS: u64 = 25_000;

/// Runtime configuration, environment-driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub concurrency: usize,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an injected variable lookup. Values that fail to
    /// parse as positive integers fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let concurrency = positive(lookup("CONCURRENCY"))
            .map(|value| value as usize)
            .unwrap_or(DEFAULT_CONCURRENCY);
        let timeout_ms = positive(lookup("TIMEOUT_MS")).unwrap_or(DEFAULT_TIMEOUT_MS);
        Self {
            concurrency,
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn positive(value: Option<String>) -> Option<u64> {
    value?.trim().parse::<u64>().ok().filter(|parsed| *parsed > 0)
}
