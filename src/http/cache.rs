//! HTTP cache control module
//!
//! Selects the Cache-Control policy for a served asset.

/// Path prefixes whose content is addressed by hash and never changes in place
const IMMUTABLE_PREFIXES: [&str; 2] = ["/assets/", "/fonts/"];

/// One year, the conventional ceiling for `max-age`
const IMMUTABLE_HEADER: &str = "public, max-age=31536000";

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache for one year
    Immutable,
    /// Leave caching to the client's heuristics (no header)
    Unspecified,
}

impl CachePolicy {
    /// Convert to Cache-Control header value
    pub const fn to_header_value(self) -> Option<&'static str> {
        match self {
            Self::Immutable => Some(IMMUTABLE_HEADER),
            Self::Unspecified => None,
        }
    }
}

/// Get the cache policy for a requested path
pub fn cache_policy_for_path(path: &str) -> CachePolicy {
    if IMMUTABLE_PREFIXES.iter().any(|p| path.starts_with(p)) {
        CachePolicy::Immutable
    } else {
        CachePolicy::Unspecified
    }
}
