//! Asset index resolution
//!
//! Maps a requested path to the content-hashed key currently holding it.

use super::manifest::AssetManifest;
use crate::store::KeyEntry;

/// Path prefixes served from the asset index
const ASSET_PREFIXES: [&str; 2] = ["/assets/", "/fonts/"];

/// Exact paths served from the asset index
const ASSET_PATHS: [&str; 1] = ["/favicon.ico"];

/// Whether the path belongs to the static asset namespace
pub fn is_asset_path(path: &str) -> bool {
    ASSET_PREFIXES.iter().any(|p| path.starts_with(p)) || ASSET_PATHS.contains(&path)
}

impl AssetManifest {
    /// Find the stored key serving `requested_path`
    ///
    /// Only the first pattern claiming the path is consulted; when several
    /// keys carry its fragment the first in listing order wins.
    pub fn resolve<'k>(&self, requested_path: &str, keys: &'k [KeyEntry]) -> Option<&'k str> {
        let file_ref = requested_path.strip_prefix('/').unwrap_or(requested_path);
        let pattern = self.patterns.iter().find(|p| p.matches_path(file_ref))?;

        keys.iter()
            .map(|k| k.name.as_str())
            .find(|name| name.contains(&pattern.key_contains))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetPattern;

    fn keys(names: &[&str]) -> Vec<KeyEntry> {
        names.iter().map(|n| KeyEntry::new(*n)).collect()
    }

    #[test]
    fn test_resolve_hashed_bundle() {
        let manifest = AssetManifest::default();
        let listing = keys(&[
            "index.fd1221fc4e.html",
            "assets/index-B-8WjzM4.a1b2c3.js",
            "rubik-abc123.woff2",
        ]);

        assert_eq!(
            manifest.resolve("/assets/index-B-8WjzM4.js", &listing),
            Some("assets/index-B-8WjzM4.a1b2c3.js")
        );
        assert_eq!(
            manifest.resolve("/fonts/rubik.woff2", &listing),
            Some("rubik-abc123.woff2")
        );
    }

    #[test]
    fn test_resolve_favicon() {
        let manifest = AssetManifest::default();

        let with_icon = keys(&["favicon.5e6f.ico", "index.fd1221fc4e.html"]);
        let key = manifest.resolve("/favicon.ico", &with_icon).unwrap();
        assert!(key.contains("favicon"));

        let without_icon = keys(&["index.fd1221fc4e.html"]);
        assert_eq!(manifest.resolve("/favicon.ico", &without_icon), None);
    }

    #[test]
    fn test_resolve_unknown_path() {
        let manifest = AssetManifest::default();
        let listing = keys(&["index-B-8WjzM4.js"]);
        assert_eq!(manifest.resolve("/assets/other-123.js", &listing), None);
        assert_eq!(manifest.resolve("/assets/index-B-8WjzM4.js", &[]), None);
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        let manifest = AssetManifest::new(
            "v1",
            vec![
                AssetPattern::contains("app.js", "missing"),
                AssetPattern::contains("app.js", "app"),
            ],
        );
        // Earlier pattern governs even though it finds nothing
        assert_eq!(manifest.resolve("/assets/app.js", &keys(&["app-1.js"])), None);
    }

    #[test]
    fn test_first_listed_key_wins() {
        let manifest = AssetManifest::default();
        let listing = keys(&["rubik-aaa.woff2", "rubik-bbb.woff2"]);
        assert_eq!(
            manifest.resolve("/fonts/rubik.woff2", &listing),
            Some("rubik-aaa.woff2")
        );
    }

    #[test]
    fn test_is_asset_path() {
        assert!(is_asset_path("/assets/index.js"));
        assert!(is_asset_path("/fonts/rubik.woff2"));
        assert!(is_asset_path("/favicon.ico"));
        assert!(!is_asset_path("/favicon.ico.bak"));
        assert!(!is_asset_path("/assets"));
        assert!(!is_asset_path("/watch/123"));
    }
}
