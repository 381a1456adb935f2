// Configuration module entry point
// Loads application configuration and builds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::Path;

use crate::assets::{AssetManifest, ManifestError};

// Re-export public types
pub use state::{AppState, UpstreamClient};
pub use types::{
    ApiConfig, AssetsConfig, AuthConfig, Config, CorsConfig, HttpConfig, LoggingConfig,
    PerformanceConfig, ServerConfig, StoreConfig,
};

/// Environment variable prefix, e.g. `EDGE_AUTH__USERNAME`
const ENV_PREFIX: &str = "EDGE";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("http.server_name", "debrid-edge")?
            .set_default("http.max_body_size", 10_485_760)? // 10MB
            .set_default("store.path", "dist")?
            .set_default("store.list_limit", 50)?
            .set_default("assets.index_key", "index.fd1221fc4e.html")?
            .set_default("api.prefix", "/api")?
            .set_default("api.cors.allow_origin", "*")?
            .set_default("api.cors.allow_methods", "GET, POST, PUT, DELETE, OPTIONS")?
            .set_default("api.cors.allow_headers", "*")?
            .set_default("api.cors.max_age", 86400)?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.api.prefix = normalize_api_prefix(&cfg.api.prefix)?;
        Ok(cfg)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Build the asset manifest: manifest file, then inline patterns, then built-in table
    pub fn load_manifest(&self) -> Result<AssetManifest, ManifestError> {
        if let Some(path) = &self.assets.manifest_file {
            return AssetManifest::load(Path::new(path));
        }

        if self.assets.patterns.is_empty() {
            return Ok(AssetManifest::default());
        }

        let version = self
            .assets
            .manifest_version
            .clone()
            .unwrap_or_else(|| "inline".to_string());
        let manifest = AssetManifest::new(version, self.assets.patterns.clone());
        manifest.validate()?;
        Ok(manifest)
    }
}

/// Strip trailing slashes so `/api/` matches `/api/x`; the prefix must stay rooted
fn normalize_api_prefix(prefix: &str) -> Result<String, config::ConfigError> {
    let trimmed = prefix.trim_end_matches('/');
    if !trimmed.starts_with('/') {
        return Err(config::ConfigError::Message(format!(
            "api.prefix must start with '/' and name a path segment, got '{prefix}'"
        )));
    }
    Ok(trimmed.to_string())
}
