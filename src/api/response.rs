// API response utility functions module

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::http::build_json_response;

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: u16,
}

/// JSON error response: `{"error": "...", "code": 404}`
pub fn error_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    build_json_response(
        status,
        &ErrorBody {
            error: message,
            code: status.as_u16(),
        },
        false,
    )
}

/// 404 Not Found response
pub fn not_found() -> Response<Full<Bytes>> {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// 401 Unauthorized response with a basic auth challenge
pub fn unauthorized(realm: &str) -> Response<Full<Bytes>> {
    let mut resp = error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    if let Ok(value) = format!("Basic realm=\"{realm}\"").parse() {
        resp.headers_mut().insert(hyper::header::WWW_AUTHENTICATE, value);
    }
    resp
}
