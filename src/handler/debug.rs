//! Debug introspection payload

use serde::Serialize;

use crate::config::AuthConfig;
use crate::store::KeyEntry;

/// Reported when basic auth is active
pub const AUTH_MODE_BASIC: &str = "basic-auth-enabled";
/// Reported when no credentials are configured
pub const AUTH_MODE_NONE: &str = "no-auth-required";

/// Body of `GET /debug`; secrets appear only as presence flags
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub path: String,
    pub kv_keys: Vec<String>,
    pub total_kv_keys: usize,
    pub auth_mode: &'static str,
    pub has_username: bool,
    pub has_password: bool,
    pub has_debrid_token: bool,
    pub manifest_version: String,
}

impl DebugReport {
    pub fn new(path: &str, keys: &[KeyEntry], auth: &AuthConfig, manifest_version: &str) -> Self {
        let kv_keys: Vec<String> = keys.iter().map(|k| k.name.clone()).collect();
        Self {
            path: path.to_string(),
            total_kv_keys: kv_keys.len(),
            kv_keys,
            auth_mode: auth_mode(auth),
            has_username: auth.has_username(),
            has_password: auth.has_password(),
            has_debrid_token: auth.has_debrid_token(),
            manifest_version: manifest_version.to_string(),
        }
    }
}

pub fn auth_mode(auth: &AuthConfig) -> &'static str {
    if auth.basic_credentials().is_some() {
        AUTH_MODE_BASIC
    } else {
        AUTH_MODE_NONE
    }
}
