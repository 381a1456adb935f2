//! Static request dispatch
//!
//! Decides, for one non-API request path, between the debug report, the
//! index document, a resolved asset, the SPA fallback, or not found.
//! Store faults are returned, never swallowed; the router turns them into a
//! 500.

use hyper::body::Bytes;

use super::debug::DebugReport;
use crate::assets::{is_asset_path, AssetManifest};
use crate::config::{AppState, AuthConfig};
use crate::http::{self, AssetClass};
use crate::store::{ContentStore, StoreError};

pub const DEBUG_PATH: &str = "/debug";
pub const INDEX_PATH: &str = "/";

/// Outcome of dispatching one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Debug(Box<DebugReport>),
    Index(Bytes),
    Asset { body: Bytes, class: AssetClass },
    Fallback(Bytes),
    NotFound,
}

/// Everything dispatch reads, borrowed from the shared state
pub struct DispatchContext<'a> {
    pub store: &'a dyn ContentStore,
    pub manifest: &'a AssetManifest,
    pub index_key: &'a str,
    pub list_limit: usize,
    pub api_prefix: &'a str,
    pub auth: &'a AuthConfig,
}

impl<'a> DispatchContext<'a> {
    pub fn from_state(state: &'a AppState) -> Self {
        Self {
            store: state.store.as_ref(),
            manifest: &state.manifest,
            index_key: &state.config.assets.index_key,
            list_limit: state.config.store.list_limit,
            api_prefix: &state.config.api.prefix,
            auth: &state.config.auth,
        }
    }
}

/// Run the dispatch state machine for `path`
pub async fn dispatch(path: &str, ctx: &DispatchContext<'_>) -> Result<Dispatch, StoreError> {
    let keys = ctx.store.list(ctx.list_limit).await?;

    if path == DEBUG_PATH {
        return Ok(Dispatch::Debug(Box::new(DebugReport::new(
            path,
            &keys,
            ctx.auth,
            &ctx.manifest.version,
        ))));
    }

    let index = ctx.store.get(ctx.index_key).await?;

    if path == INDEX_PATH {
        if let Some(index) = &index {
            return Ok(Dispatch::Index(index.clone()));
        }
    }

    if is_asset_path(path) {
        if let Some(key) = ctx.manifest.resolve(path, &keys) {
            if let Some(body) = ctx.store.get(key).await? {
                return Ok(Dispatch::Asset {
                    body,
                    class: http::classify(path),
                });
            }
        }
    }

    match index {
        Some(index) if !path.starts_with(ctx.api_prefix) => Ok(Dispatch::Fallback(index)),
        _ => Ok(Dispatch::NotFound),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::store::{KeyEntry, MemoryStore};
    use async_trait::async_trait;

    pub const INDEX_KEY: &str = "index.fd1221fc4e.html";
    pub const INDEX_HTML: &str = "<!doctype html><div id=\"app\"></div>";

    /// Store from the deployment scenario: index, one bundle, one font
    pub fn scenario_store() -> MemoryStore {
        MemoryStore::new()
            .with(INDEX_KEY, INDEX_HTML)
            .with("index-B-8WjzM4.js", "console.log(1)")
            .with("rubik-abc123.woff2", "woff2-bytes")
    }

    /// Store whose operations fail on demand
    pub struct FaultyStore {
        pub inner: MemoryStore,
        pub fail_list: bool,
        pub fail_get: bool,
    }

    /// Store that lists keys whose content has since disappeared
    pub struct StaleListingStore {
        pub inner: MemoryStore,
        pub stale: Vec<&'static str>,
    }

    #[async_trait]
    impl ContentStore for StaleListingStore {
        async fn list(&self, limit: usize) -> Result<Vec<KeyEntry>, StoreError> {
            let mut keys = self.inner.list(usize::MAX).await?;
            keys.extend(self.stale.iter().map(|k| KeyEntry::new(*k)));
            keys.sort_by(|a, b| a.name.cmp(&b.name));
            keys.truncate(limit);
            Ok(keys)
        }

        async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
            if self.stale.iter().any(|k| *k == key) {
                return Ok(None);
            }
            self.inner.get(key).await
        }
    }

    #[async_trait]
    impl ContentStore for FaultyStore {
        async fn list(&self, limit: usize) -> Result<Vec<KeyEntry>, StoreError> {
            if self.fail_list {
                return Err(StoreError::Backend("listing timed out".to_string()));
            }
            self.inner.list(limit).await
        }

        async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
            if self.fail_get {
                return Err(StoreError::Backend(format!("cannot read {key}")));
            }
            self.inner.get(key).await
        }
    }

    fn ctx<'a>(
        store: &'a dyn ContentStore,
        manifest: &'a AssetManifest,
        auth: &'a AuthConfig,
    ) -> DispatchContext<'a> {
        DispatchContext {
            store,
            manifest,
            index_key: INDEX_KEY,
            list_limit: 50,
            api_prefix: "/api",
            auth,
        }
    }

    async fn run(store: &dyn ContentStore, path: &str) -> Result<Dispatch, StoreError> {
        let manifest = AssetManifest::default();
        let auth = AuthConfig::default();
        dispatch(path, &ctx(store, &manifest, &auth)).await
    }

    #[tokio::test]
    async fn test_index_document() {
        let store = scenario_store();
        assert_eq!(
            run(&store, "/").await.unwrap(),
            Dispatch::Index(Bytes::from(INDEX_HTML))
        );
    }

    #[tokio::test]
    async fn test_hashed_script() {
        let store = scenario_store();
        let Dispatch::Asset { body, class } = run(&store, "/assets/index-B-8WjzM4.js").await.unwrap()
        else {
            panic!("expected asset");
        };
        assert_eq!(body, Bytes::from("console.log(1)"));
        assert_eq!(class.content_type, "application/javascript");
        assert_eq!(
            class.cache_control,
            Some("public, max-age=31536000")
        );
    }

    #[tokio::test]
    async fn test_font_by_logical_name() {
        let store = scenario_store();
        let Dispatch::Asset { body, class } = run(&store, "/fonts/rubik.woff2").await.unwrap() else {
            panic!("expected asset");
        };
        assert_eq!(body, Bytes::from("woff2-bytes"));
        assert_eq!(class.content_type, "font/woff2");
        assert!(class.cache_control.is_some());
    }

    #[tokio::test]
    async fn test_spa_fallback_for_unknown_routes() {
        let store = scenario_store();
        for path in ["/unknown/path", "/watch/abc", "/settings"] {
            assert_eq!(
                run(&store, path).await.unwrap(),
                Dispatch::Fallback(Bytes::from(INDEX_HTML)),
                "path {path}"
            );
        }
    }

    #[tokio::test]
    async fn test_unresolved_asset_falls_back_to_shell() {
        let store = scenario_store();
        assert_eq!(
            run(&store, "/assets/index-Sbz81UDz.css").await.unwrap(),
            Dispatch::Fallback(Bytes::from(INDEX_HTML))
        );
    }

    #[tokio::test]
    async fn test_listed_asset_with_empty_fetch_falls_back_to_shell() {
        let store = StaleListingStore {
            inner: MemoryStore::new().with(INDEX_KEY, INDEX_HTML),
            stale: vec!["rubik-abc123.woff2"],
        };
        assert_eq!(
            run(&store, "/fonts/rubik.woff2").await.unwrap(),
            Dispatch::Fallback(Bytes::from(INDEX_HTML))
        );
    }

    #[tokio::test]
    async fn test_listed_asset_with_empty_fetch_and_no_index_is_not_found() {
        let store = StaleListingStore {
            inner: MemoryStore::new(),
            stale: vec!["rubik-abc123.woff2"],
        };
        assert_eq!(
            run(&store, "/fonts/rubik.woff2").await.unwrap(),
            Dispatch::NotFound
        );
    }

    #[tokio::test]
    async fn test_missing_asset_without_index_is_not_found() {
        let store = MemoryStore::new().with("index-B-8WjzM4.js", "js");
        assert_eq!(
            run(&store, "/favicon.ico").await.unwrap(),
            Dispatch::NotFound
        );
        assert_eq!(run(&store, "/").await.unwrap(), Dispatch::NotFound);
    }

    #[tokio::test]
    async fn test_api_prefix_never_falls_back() {
        let store = scenario_store();
        assert_eq!(run(&store, "/api/anything").await.unwrap(), Dispatch::NotFound);
        assert_eq!(run(&store, "/apiary").await.unwrap(), Dispatch::NotFound);
    }

    #[tokio::test]
    async fn test_debug_report() {
        let store = scenario_store();
        let Dispatch::Debug(report) = run(&store, "/debug").await.unwrap() else {
            panic!("expected debug report");
        };
        assert_eq!(report.path, "/debug");
        assert_eq!(report.total_kv_keys, 3);
        assert_eq!(report.auth_mode, "no-auth-required");
        assert_eq!(report.manifest_version, "builtin");
    }

    #[tokio::test]
    async fn test_debug_does_not_fetch_index() {
        let store = FaultyStore {
            inner: scenario_store(),
            fail_list: false,
            fail_get: true,
        };
        assert!(matches!(run(&store, "/debug").await, Ok(Dispatch::Debug(_))));
    }

    #[tokio::test]
    async fn test_listing_fault_is_returned() {
        let store = FaultyStore {
            inner: scenario_store(),
            fail_list: true,
            fail_get: false,
        };
        let err = run(&store, "/").await.unwrap_err();
        assert!(err.to_string().contains("listing timed out"));
    }

    #[tokio::test]
    async fn test_fetch_fault_is_returned() {
        let store = FaultyStore {
            inner: scenario_store(),
            fail_list: false,
            fail_get: true,
        };
        assert!(run(&store, "/unknown").await.is_err());
    }
}
