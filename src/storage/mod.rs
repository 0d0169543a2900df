//! Storage layer for Tally
//!
//! Application data is persisted as opaque text blobs under a fixed set of
//! logical keys. The core never looks inside a blob; [`crate::state`] owns
//! the (de)serialization.

pub mod file_io;
pub mod file_store;
pub mod memory;

pub use file_io::{read_blob, read_json, write_blob_atomic, write_json_atomic};
pub use file_store::FileBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::TallyError;

/// Logical blob keys
pub mod keys {
    pub const ENTRIES: &str = "entries";
    pub const BUDGETS: &str = "budgets";
    pub const GOALS: &str = "goals";

    /// Every key the application writes
    pub const ALL: [&str; 3] = [ENTRIES, BUDGETS, GOALS];
}

/// Key-value store for serialized application data
pub trait BlobStore {
    /// Fetch the blob stored under `key`, `None` if nothing was stored yet
    fn load(&self, key: &str) -> Result<Option<String>, TallyError>;

    /// Replace the blob stored under `key`
    fn store(&mut self, key: &str, blob: &str) -> Result<(), TallyError>;
}
