// CORS handling for the API namespace

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use hyper::{Response, StatusCode};

use crate::config::CorsConfig;
use crate::logger;

/// Build OPTIONS response (preflight request)
pub fn build_preflight_response(cors: &CorsConfig) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, cors.allow_origin.as_str())
        .header(ACCESS_CONTROL_ALLOW_METHODS, cors.allow_methods.as_str())
        .header(ACCESS_CONTROL_ALLOW_HEADERS, cors.allow_headers.as_str())
        .header(ACCESS_CONTROL_MAX_AGE, cors.max_age)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            logger::log_api_error(&format!("Failed to build OPTIONS response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

/// Attach the allowed origin to an API response
pub fn apply_cors_headers(resp: &mut Response<Full<Bytes>>, cors: &CorsConfig) {
    match HeaderValue::from_str(&cors.allow_origin) {
        Ok(origin) => {
            resp.headers_mut().insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        }
        Err(e) => logger::log_api_error(&format!(
            "Invalid CORS origin '{}': {e}",
            cors.allow_origin
        )),
    }
}
