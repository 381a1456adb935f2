//! Asset manifest
//!
//! An ordered table of `(path fragment, key fragment)` pairs describing the
//! currently deployed build. Loaded once at startup and shared read-only.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::logger;

/// Errors raised while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid manifest: {0}")]
    Invalid(String),
}

/// One row of the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPattern {
    /// Fragment the requested file name must contain
    pub path_contains: String,
    /// Fragment the stored key must contain
    pub key_contains: String,
    /// Require the requested file name to equal `path_contains`
    #[serde(default)]
    pub exact: bool,
}

impl AssetPattern {
    pub fn contains(path_contains: &str, key_contains: &str) -> Self {
        Self {
            path_contains: path_contains.to_string(),
            key_contains: key_contains.to_string(),
            exact: false,
        }
    }

    pub fn exact(path: &str, key_contains: &str) -> Self {
        Self {
            path_contains: path.to_string(),
            key_contains: key_contains.to_string(),
            exact: true,
        }
    }

    /// Does this pattern claim the bare (slash-stripped) file reference?
    pub fn matches_path(&self, file_ref: &str) -> bool {
        if self.exact {
            file_ref == self.path_contains
        } else {
            file_ref.contains(&self.path_contains)
        }
    }
}

/// Versioned, ordered asset pattern table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub patterns: Vec<AssetPattern>,
}

fn default_version() -> String {
    "unversioned".to_string()
}

impl Default for AssetManifest {
    /// Table for the build currently shipped with the UI
    fn default() -> Self {
        Self {
            version: "builtin".to_string(),
            patterns: vec![
                AssetPattern::contains("index-B-8WjzM4.js", "index-B-8WjzM4"),
                AssetPattern::contains("index-DAIJuZOP.js", "index-DAIJuZOP"),
                AssetPattern::contains("index-Sbz81UDz.css", "index-Sbz81UDz"),
                AssetPattern::contains("watch._-DE511lZx.css", "watch._-DE511lZx"),
                AssetPattern::contains("watch._.lazy-mpnTaOqP.js", "watch._.lazy-mpnTaOqP"),
                AssetPattern::exact("favicon.ico", "favicon"),
                AssetPattern::contains("rubik.woff2", "rubik"),
            ],
        }
    }
}

impl AssetManifest {
    pub fn new(version: impl Into<String>, patterns: Vec<AssetPattern>) -> Self {
        Self {
            version: version.into(),
            patterns,
        }
    }

    /// Parse a manifest from TOML text
    ///
    /// ```toml
    /// version = "2024-06-01"
    ///
    /// [[patterns]]
    /// path_contains = "index-B-8WjzM4.js"
    /// key_contains = "index-B-8WjzM4"
    /// ```
    pub fn from_toml(text: &str) -> Result<Self, ManifestError> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate a manifest file
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Reject empty fragments and report shadowed patterns
    ///
    /// A pattern is shadowed when an earlier pattern claims every path it
    /// could match. Shadowing is legal (first match wins) but almost always a
    /// stale entry, so it is only logged.
    pub fn validate(&self) -> Result<(), ManifestError> {
        for (i, pattern) in self.patterns.iter().enumerate() {
            if pattern.path_contains.is_empty() {
                return Err(ManifestError::Invalid(format!(
                    "pattern #{i} has an empty path_contains"
                )));
            }
            if pattern.key_contains.is_empty() {
                return Err(ManifestError::Invalid(format!(
                    "pattern #{i} ('{}') has an empty key_contains",
                    pattern.path_contains
                )));
            }
        }

        for (earlier, later) in self.shadowed_pairs() {
            logger::log_warning(&format!(
                "Asset pattern '{}' is shadowed by earlier pattern '{}'",
                self.patterns[later].path_contains, self.patterns[earlier].path_contains
            ));
        }
        Ok(())
    }

    /// Index pairs `(earlier, later)` where `earlier` claims every path `later` matches
    pub fn shadowed_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (later, pattern) in self.patterns.iter().enumerate() {
            // An exact pattern only claims its own path, never a substring match
            if let Some(earlier) = self.patterns[..later].iter().position(|p| {
                (!p.exact || pattern.exact) && p.matches_path(&pattern.path_contains)
            }) {
                pairs.push((earlier, later));
            }
        }
        pairs
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
