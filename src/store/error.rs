//! Store error types

use thiserror::Error;

/// Unexpected fault while talking to a content store
///
/// A missing key is not a fault: `get` returns `Ok(None)` for that.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid store key '{0}'")]
    InvalidKey(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }
}
