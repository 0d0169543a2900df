//! File-backed blob store
//!
//! One `<key>.json` file per key under the data directory.

use tracing::debug;

use super::file_io::{read_blob, write_blob_atomic};
use super::BlobStore;
use crate::config::paths::TallyPaths;
use crate::error::TallyError;

pub struct FileBlobStore {
    paths: TallyPaths,
}

impl FileBlobStore {
    /// Create a new store, making sure the directories exist
    pub fn new(paths: TallyPaths) -> Result<Self, TallyError> {
        paths.ensure_directories()?;
        Ok(Self { paths })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &TallyPaths {
        &self.paths
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, TallyError> {
        read_blob(self.paths.blob_file(key))
    }

    fn store(&mut self, key: &str, blob: &str) -> Result<(), TallyError> {
        let path = self.paths.blob_file(key);
        write_blob_atomic(&path, blob)?;
        debug!(key, path = %path.display(), bytes = blob.len(), "Stored blob");
        Ok(())
    }
}
