// Reverse proxy to the debrid backend
//
// Requests are forwarded opaquely: the gateway knows nothing about the
// backend's routes beyond stripping the API prefix.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{self, HeaderMap, HeaderName, HeaderValue};
use hyper::{Request, Response, Uri};
use thiserror::Error;

use crate::config::AppState;

/// Headers that describe a single hop and are never forwarded
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no upstream configured")]
    NotConfigured,

    #[error("invalid upstream url '{0}'")]
    InvalidUpstream(String),

    #[error("request body exceeds {0} bytes")]
    BodyTooLarge(u64),

    #[error("failed to read request body: {0}")]
    Body(String),

    #[error("upstream request failed: {0}")]
    Upstream(String),
}

/// Build the upstream URI: `base` + path with `prefix` stripped + query
pub fn upstream_uri(base: &str, prefix: &str, path_and_query: &str) -> Result<Uri, GatewayError> {
    let rest = path_and_query
        .strip_prefix(prefix)
        .unwrap_or(path_and_query);
    let rest = if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{rest}")
    };

    let target = format!("{}{rest}", base.trim_end_matches('/'));
    let uri: Uri = target
        .parse()
        .map_err(|_| GatewayError::InvalidUpstream(target.clone()))?;

    if uri.scheme_str() != Some("http") || uri.authority().is_none() {
        return Err(GatewayError::InvalidUpstream(target));
    }
    Ok(uri)
}

/// Validate Content-Length header against the body limit
pub fn check_content_length(headers: &HeaderMap, max_body_size: u64) -> Result<(), GatewayError> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    match declared {
        Some(size) if size > max_body_size => Err(GatewayError::BodyTooLarge(max_body_size)),
        _ => Ok(()),
    }
}

/// Copy request headers that may cross the proxy
fn forwarded_headers(source: &HeaderMap, debrid_token: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(source.len());
    for (name, value) in source {
        if HOP_BY_HOP.contains(name)
            || name == header::HOST
            || name == header::AUTHORIZATION
            || name == header::CONTENT_LENGTH
        {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if let Some(token) = debrid_token.filter(|t| !t.is_empty()) {
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}")) {
            headers.insert(header::AUTHORIZATION, value);
        }
    }
    headers
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in &HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Forward an API request upstream and relay the buffered response
pub async fn forward<B>(req: Request<B>, state: &AppState) -> Result<Response<Full<Bytes>>, GatewayError>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let base = state
        .config
        .api
        .upstream
        .as_deref()
        .ok_or(GatewayError::NotConfigured)?;

    let max_body_size = state.config.http.max_body_size;
    check_content_length(req.headers(), max_body_size)?;

    let path_and_query = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path(), |pq| pq.as_str());
    let uri = upstream_uri(base, &state.config.api.prefix, path_and_query)?;

    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let body = Limited::new(body, limit)
        .collect()
        .await
        .map_err(|e| {
            if e.is::<LengthLimitError>() {
                GatewayError::BodyTooLarge(max_body_size)
            } else {
                GatewayError::Body(e.to_string())
            }
        })?
        .to_bytes();

    let mut upstream_req = Request::builder()
        .method(parts.method)
        .uri(uri)
        .body(Full::new(body))
        .map_err(|e| GatewayError::Upstream(e.to_string()))?;
    *upstream_req.headers_mut() =
        forwarded_headers(&parts.headers, state.config.auth.debrid_token.as_deref());

    let upstream_resp = state
        .client
        .request(upstream_req)
        .await
        .map_err(|e| GatewayError::Upstream(e.to_string()))?;

    let (mut resp_parts, resp_body) = upstream_resp.into_parts();
    let bytes = resp_body
        .collect()
        .await
        .map_err(|e| GatewayError::Upstream(e.to_string()))?
        .to_bytes();

    strip_hop_by_hop(&mut resp_parts.headers);
    Ok(Response::from_parts(resp_parts, Full::new(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_uri_strips_prefix() {
        let uri = upstream_uri("http://127.0.0.1:9000", "/api", "/api/torrents?page=2").unwrap();
        assert_eq!(uri.to_string(), "http://127.0.0.1:9000/torrents?page=2");
    }

    #[test]
    fn test_upstream_uri_keeps_base_path() {
        let uri = upstream_uri("http://backend:9000/v1/", "/api", "/api/user").unwrap();
        assert_eq!(uri.to_string(), "http://backend:9000/v1/user");

        let root = upstream_uri("http://backend:9000", "/api", "/api").unwrap();
        assert_eq!(root.to_string(), "http://backend:9000/");

        let query = upstream_uri("http://backend:9000", "/api", "/api?x=1").unwrap();
        assert_eq!(query.to_string(), "http://backend:9000/?x=1");
    }

    #[test]
    fn test_upstream_uri_requires_http() {
        assert!(matches!(
            upstream_uri("https://api.example.com", "/api", "/api/x"),
            Err(GatewayError::InvalidUpstream(_))
        ));
        assert!(matches!(
            upstream_uri("not a url", "/api", "/api/x"),
            Err(GatewayError::InvalidUpstream(_))
        ));
    }

    #[test]
    fn test_check_content_length() {
        let mut headers = HeaderMap::new();
        assert!(check_content_length(&headers, 10).is_ok());
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("11"));
        assert!(matches!(
            check_content_length(&headers, 10),
            Err(GatewayError::BodyTooLarge(10))
        ));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("abc"));
        assert!(check_content_length(&headers, 10).is_ok());
    }

    #[test]
    fn test_forwarded_headers_replace_credentials() {
        let mut source = HeaderMap::new();
        source.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic YTpi"));
        source.insert(header::HOST, HeaderValue::from_static("edge.local"));
        source.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        source.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let headers = forwarded_headers(&source, Some("tok123"));
        assert_eq!(headers[header::AUTHORIZATION], "Bearer tok123");
        assert_eq!(headers[header::ACCEPT], "application/json");
        assert!(headers.get(header::HOST).is_none());
        assert!(headers.get(header::CONNECTION).is_none());

        let without_token = forwarded_headers(&source, None);
        assert!(without_token.get(header::AUTHORIZATION).is_none());
    }
}
