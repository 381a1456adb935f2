//! In-memory content store
//!
//! Keys are kept in lexicographic order, matching the listing order of
//! common KV backends.

use std::collections::BTreeMap;

use async_trait::async_trait;
use hyper::body::Bytes;

use super::{ContentStore, KeyEntry, StoreError};

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, Bytes>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a blob
    pub fn insert(&mut self, key: impl Into<String>, data: impl Into<Bytes>) {
        self.entries.insert(key.into(), data.into());
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(key, data);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list(&self, limit: usize) -> Result<Vec<KeyEntry>, StoreError> {
        Ok(self
            .entries
            .keys()
            .take(limit)
            .map(|k| KeyEntry::new(k.as_str()))
            .collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }
}
