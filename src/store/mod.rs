//! Content store module
//!
//! Key-value blob storage that backs static asset serving. The edge server
//! only reads from a store: it lists keys and fetches bytes by key.

mod directory;
mod error;
mod memory;

pub use directory::DirectoryStore;
pub use error::StoreError;
pub use memory::MemoryStore;

use async_trait::async_trait;
use hyper::body::Bytes;

/// One key in a store listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub name: String,
}

impl KeyEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Read-only access to a content-addressed blob store
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List at most `limit` keys, in the store's stable order
    async fn list(&self, limit: usize) -> Result<Vec<KeyEntry>, StoreError>;

    /// Fetch the bytes stored under `key`, `None` if the key does not exist
    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError>;
}
