//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TallyError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, TallyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| TallyError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| TallyError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TallyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic_with(path.as_ref(), |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| TallyError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Read a blob as text, `None` if the file doesn't exist
pub fn read_blob<P: AsRef<Path>>(path: P) -> Result<Option<String>, TallyError> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| TallyError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Write a blob atomically, replacing whatever was there
pub fn write_blob_atomic<P: AsRef<Path>>(path: P, blob: &str) -> Result<(), TallyError> {
    write_atomic_with(path.as_ref(), |writer| {
        writer
            .write_all(blob.as_bytes())
            .map_err(|e| TallyError::Storage(format!("Failed to write data: {}", e)))
    })
}

/// Write through a temp file in the same directory, then rename over `path`
///
/// The target is either completely written or not modified at all.
fn write_atomic_with<F>(path: &Path, write: F) -> Result<(), TallyError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), TallyError>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TallyError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| TallyError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    if let Err(e) = write(&mut writer) {
        drop(writer);
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    writer
        .flush()
        .map_err(|e| TallyError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TallyError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TallyError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
