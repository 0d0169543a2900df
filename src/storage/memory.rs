//! In-memory blob store, for tests and dry runs

use std::collections::HashMap;

use super::BlobStore;
use crate::error::TallyError;

#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, String>,
    writes: usize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing blobs
    pub fn with_blobs<I, K, V>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            blobs: blobs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            writes: 0,
        }
    }

    /// Raw blob under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    /// Number of `store` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, TallyError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn store(&mut self, key: &str, blob: &str) -> Result<(), TallyError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        self.writes += 1;
        Ok(())
    }
}
