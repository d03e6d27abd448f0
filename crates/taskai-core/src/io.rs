use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Replace `path` with `data` via a sibling temp file, so readers never see a
/// half-written record file.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Seed `path` with `data` unless it already exists. Returns true if written.
pub fn write_if_missing(path: &Path, data: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    atomic_write(path, data)?;
    Ok(true)
}

/// Load a JSON array of records. A missing or blank file is an empty list.
pub fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<T> = serde_json::from_str(&data)?;
    debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Store `records` as a pretty-printed JSON array with a trailing newline.
pub fn write_json_array<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut data = serde_json::to_string_pretty(records)?;
    data.push('\n');
    atomic_write(path, data.as_bytes())
}
