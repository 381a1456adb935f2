//! Directory-backed content store
//!
//! Every regular file directly inside the root directory is one key, named
//! after its file name. Build output (e.g. a bundler's `dist/`) can be served
//! as-is after flattening it into the directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use hyper::body::Bytes;
use tokio::fs;

use super::{ContentStore, KeyEntry, StoreError};

#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to a file path, rejecting anything that could escape the root
    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ContentStore for DirectoryStore {
    async fn list(&self, limit: usize) -> Result<Vec<KeyEntry>, StoreError> {
        let root_key = self.root.display().to_string();
        let mut dir = fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::io(&root_key, e))?;

        let mut names = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&root_key, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StoreError::io(&root_key, e))?;
            if !file_type.is_file() {
                continue;
            }
            // Non UTF-8 names cannot be requested as keys
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        names.sort_unstable();
        Ok(names.into_iter().take(limit).map(KeyEntry::new).collect())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let path = self.key_path(key)?;
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, e)),
        }
    }
}
