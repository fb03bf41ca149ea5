//! Archiver core: pure URL classification and input-list parsing.
mod classify;
mod input;

pub use classify::{classify, path_extension, Classification, UrlKind};
pub use input::parse_url_lines;
