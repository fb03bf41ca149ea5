use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::filename::short_hash;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure output directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Resolve a path under `dir` that does not exist yet. An occupied
/// `filename` gets a short digest of `salt` inserted before its
/// extension; a numeric suffix disambiguates beyond that.
pub fn unique_path(dir: &Path, filename: &str, salt: &str) -> PathBuf {
    let full = dir.join(filename);
    if !full.exists() {
        return full;
    }

    let (base, ext) = split_extension(filename);
    let salted = format!("{base}_{}{ext}", short_hash(salt));
    let mut candidate = dir.join(&salted);

    let (salted_base, salted_ext) = split_extension(&salted);
    let mut counter = 2u32;
    while candidate.exists() {
        candidate = dir.join(format!("{salted_base}_{counter}{salted_ext}"));
        counter += 1;
    }
    candidate
}

/// Atomically write `bytes` to `path` by writing a temp file in the
/// target directory then renaming it into place.
pub fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    let dir = path
        .parent()
        .ok_or_else(|| PersistError::OutputDir("artifact path has no parent".into()))?;
    ensure_output_dir(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(path).map_err(|e| PersistError::Io(e.error))?;
    Ok(())
}

fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}
