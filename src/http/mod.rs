//! HTTP protocol layer module
//!
//! Content-type and cache policy selection plus response builders, decoupled
//! from request dispatch.

pub mod cache;
pub mod mime;
pub mod response;

pub use cache::CachePolicy;
pub use response::{
    build_404_response, build_asset_response, build_html_response, build_json_response,
    build_store_error_response, build_text_response,
};

/// Response annotations for a served asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetClass {
    pub content_type: &'static str,
    pub cache_control: Option<&'static str>,
}

/// Derive content type and caching policy from the requested path
pub fn classify(path: &str) -> AssetClass {
    AssetClass {
        content_type: mime::content_type_for_path(path),
        cache_control: cache::cache_policy_for_path(path).to_header_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_hashed_script() {
        let class = classify("/assets/index-XYZ.js");
        assert_eq!(class.content_type, "application/javascript");
        assert_eq!(
            class.cache_control,
            Some("public, max-age=31536000")
        );
    }

    #[test]
    fn test_classify_unknown_file() {
        let class = classify("/somefile.unknown");
        assert_eq!(class.content_type, "text/plain");
        assert_eq!(class.cache_control, None);
    }

    #[test]
    fn test_classify_favicon_has_no_cache_header() {
        let class = classify("/favicon.ico");
        assert_eq!(class.content_type, "image/x-icon");
        assert_eq!(class.cache_control, None);
    }
}
