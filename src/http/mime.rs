//! MIME type detection module
//!
//! Returns the Content-Type for a requested asset path.

/// Fallback for anything the asset table does not know
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Content type of the SPA shell
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Get Content-Type from the path's suffix
///
/// # Examples
/// ```
/// use debrid_edge::http::mime::content_type_for_path;
/// assert_eq!(content_type_for_path("/assets/index.js"), "application/javascript");
/// assert_eq!(content_type_for_path("/notes.md"), "text/plain");
/// ```
pub fn content_type_for_path(path: &str) -> &'static str {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext);
    match extension {
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        _ => DEFAULT_CONTENT_TYPE,
    }
}
