//! Archiver engine: fetch, categorized persistence, and the bounded
//! worker-pool scheduler.
mod asset;
mod decode;
mod endpoint;
mod errlog;
mod fetch;
mod filename;
mod layout;
mod persist;
mod scheduler;
mod types;

pub use asset::archive_asset;
pub use decode::{decode_body, DecodedText};
pub use endpoint::archive_endpoint;
pub use errlog::{ErrorLog, TimestampFn};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_TIMEOUT, USER_AGENT};
pub use filename::{endpoint_slug, filename_from_url, short_hash};
pub use layout::OutputLayout;
pub use persist::{ensure_output_dir, unique_path, write_artifact, PersistError};
pub use scheduler::{Archiver, RunSummary};
pub use types::{ArchiveError, FailureKind, FetchError, FetchResult};
