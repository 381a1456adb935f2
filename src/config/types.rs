// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

use crate::assets::AssetPattern;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub store: StoreConfig,
    pub assets: AssetsConfig,
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
    /// Seconds to wait for open connections after a shutdown signal
    pub shutdown_timeout: u64,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

/// Content store configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Directory holding the uploaded build
    pub path: String,
    /// Keys fetched per listing
    pub list_limit: usize,
}

/// Asset index configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Store key of the SPA shell document
    pub index_key: String,
    /// TOML manifest file; takes precedence over inline patterns
    #[serde(default)]
    pub manifest_file: Option<String>,
    #[serde(default)]
    pub manifest_version: Option<String>,
    /// Inline patterns; the built-in table is used when empty
    #[serde(default)]
    pub patterns: Vec<AssetPattern>,
}

/// API gateway configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Namespace delegated to the gateway, excluded from SPA fallback
    pub prefix: String,
    /// Base URL requests are forwarded to (http only)
    #[serde(default)]
    pub upstream: Option<String>,
    pub cors: CorsConfig,
}

/// CORS headers attached to API responses
#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
    pub max_age: u64,
}

/// Credentials; only their presence is ever reported
#[derive(Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub debrid_token: Option<String>,
}

impl AuthConfig {
    /// Basic auth credentials, present only when both halves are set
    pub fn basic_credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user, pass))
            }
            _ => None,
        }
    }

    pub fn has_username(&self) -> bool {
        self.username.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn has_password(&self) -> bool {
        self.password.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn has_debrid_token(&self) -> bool {
        self.debrid_token.as_deref().is_some_and(|v| !v.is_empty())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("AuthConfig")
            .field("username", &redact(&self.username))
            .field("password", &redact(&self.password))
            .field("debrid_token", &redact(&self.debrid_token))
            .finish()
    }
}
