// Application state module
// Immutable per-process state shared by every request

use std::sync::Arc;

use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use http_body_util::Full;
use hyper::body::Bytes;

use super::types::Config;
use crate::assets::AssetManifest;
use crate::store::ContentStore;

/// HTTP client used by the API gateway
pub type UpstreamClient = Client<HttpConnector, Full<Bytes>>;

/// Application state
pub struct AppState {
    pub config: Config,
    pub manifest: Arc<AssetManifest>,
    pub store: Arc<dyn ContentStore>,
    pub client: UpstreamClient,
}

impl AppState {
    pub fn new(config: Config, manifest: AssetManifest, store: Arc<dyn ContentStore>) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            config,
            manifest: Arc::new(manifest),
            store,
            client,
        }
    }
}
