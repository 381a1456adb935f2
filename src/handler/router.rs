//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation,
//! namespace delegation, turning dispatch outcomes into responses, and access logging.

use crate::api;
use crate::config::AppState;
use crate::handler::dispatch::{dispatch, Dispatch, DispatchContext};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, HeaderValue, REFERER, SERVER, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let entry = access_log.then(|| access_entry(&req, remote_addr));

    let path = req.uri().path().to_string();
    let mut response = if api::is_api_path(&path, &state.config.api.prefix) {
        api::handle_api_request(req, &state).await
    } else {
        serve_static(req.method(), &path, &state).await
    };

    if let Ok(server) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, server);
    }

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Serve a non-API request from the content store
async fn serve_static(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let is_head = *method == Method::HEAD;
    if *method != Method::GET && !is_head {
        return http::build_404_response();
    }

    let ctx = DispatchContext::from_state(state);
    match dispatch(path, &ctx).await {
        Ok(outcome) => build_dispatch_response(outcome, is_head),
        Err(e) => {
            logger::log_store_fault(path, &e);
            http::build_store_error_response(&e.to_string())
        }
    }
}

/// Convert a dispatch outcome into an HTTP response
fn build_dispatch_response(outcome: Dispatch, is_head: bool) -> Response<Full<Bytes>> {
    match outcome {
        Dispatch::Debug(report) => http::build_json_response(StatusCode::OK, &report, is_head),
        Dispatch::Index(html) | Dispatch::Fallback(html) => {
            http::build_html_response(html, is_head)
        }
        Dispatch::Asset { body, class } => http::build_asset_response(body, &class, is_head),
        Dispatch::NotFound => http::build_404_response(),
    }
}

/// Capture the request side of an access log line
fn access_entry<B>(req: &Request<B>, remote_addr: SocketAddr) -> AccessLogEntry {
    let mut entry = AccessLogEntry::new(
        remote_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = match req.version() {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
    .to_string();
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v: &HeaderValue| v.to_str().ok())
            .map(ToString::to_string)
    };
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}
