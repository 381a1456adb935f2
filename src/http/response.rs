//! HTTP response building module
//!
//! Provides builders for the responses the edge server emits, decoupled from
//! dispatch logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use super::mime::HTML_CONTENT_TYPE;
use super::AssetClass;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_text_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 500 response for a failed store operation
///
/// The fault message is included on purpose so operators can see which
/// store call failed.
pub fn build_store_error_response(message: &str) -> Response<Full<Bytes>> {
    build_text_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("Static file error: {message}"),
    )
}

/// Build plain text response
pub fn build_text_response(status: StatusCode, text: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain")
        .header("Content-Length", text.len())
        .body(Full::new(Bytes::from(text.to_owned())))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build HTML response for the SPA shell
pub fn build_html_response(content: Bytes, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head { Bytes::new() } else { content };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", HTML_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build response for a resolved static asset
pub fn build_asset_response(
    data: Bytes,
    class: &AssetClass,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { data };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", class.content_type)
        .header("Content-Length", content_length);

    if let Some(cache_control) = class.cache_control {
        builder = builder.header("Cache-Control", cache_control);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("asset", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build JSON response
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string_pretty(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_text_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };
    let content_length = json.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(json)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()["Content-Type"], "text/plain");
        assert_eq!(body_string(resp).await, "Not Found");
    }

    #[tokio::test]
    async fn test_store_error_response_carries_message() {
        let resp = build_store_error_response("disk on fire");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(resp).await, "Static file error: disk on fire");
    }

    #[tokio::test]
    async fn test_asset_response_head_keeps_length() {
        let class = AssetClass {
            content_type: "font/woff2",
            cache_control: Some("public, max-age=31536000"),
        };
        let resp = build_asset_response(Bytes::from_static(b"abcd"), &class, true);
        assert_eq!(resp.headers()["Content-Length"], "4");
        assert_eq!(resp.headers()["Cache-Control"], "public, max-age=31536000");
        assert_eq!(body_string(resp).await, "");
    }

    #[tokio::test]
    async fn test_asset_response_without_cache_header() {
        let class = AssetClass {
            content_type: "image/x-icon",
            cache_control: None,
        };
        let resp = build_asset_response(Bytes::from_static(b"ico"), &class, false);
        assert!(resp.headers().get("Cache-Control").is_none());
        assert_eq!(body_string(resp).await, "ico");
    }
}
