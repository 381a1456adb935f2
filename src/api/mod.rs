// API module entry
// Gateway for the API namespace: CORS, basic auth and forwarding to the debrid backend

mod auth;
mod cors;
mod proxy;
mod response;

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};

use crate::config::AppState;
use crate::logger;

pub use proxy::GatewayError;
pub use response::*;

/// Realm announced in basic auth challenges
const AUTH_REALM: &str = "debrid-edge";

/// Whether `path` lies in the API namespace (`/api` or `/api/...`)
pub fn is_api_path(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// API route handler
///
/// Answers CORS preflights, enforces basic auth when configured, then
/// forwards to the upstream backend.
pub async fn handle_api_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let cors_config = &state.config.api.cors;

    if req.method() == Method::OPTIONS {
        return cors::build_preflight_response(cors_config);
    }

    let mut resp = if let Some((user, pass)) = state.config.auth.basic_credentials() {
        if auth::is_authorized(req.headers(), user, pass) {
            proxy_request(req, state).await
        } else {
            logger::log_warning(&format!(
                "Rejected unauthenticated API request: {} {}",
                req.method(),
                req.uri().path()
            ));
            unauthorized(AUTH_REALM)
        }
    } else {
        proxy_request(req, state).await
    };

    cors::apply_cors_headers(&mut resp, cors_config);
    resp
}

async fn proxy_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match proxy::forward(req, state).await {
        Ok(resp) => resp,
        Err(GatewayError::NotConfigured) => not_found(),
        Err(e) => {
            logger::log_api_error(&format!("{method} {path}: {e}"));
            let status = match e {
                GatewayError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
                GatewayError::Body(_) => StatusCode::BAD_REQUEST,
                GatewayError::InvalidUpstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
                GatewayError::NotConfigured | GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            };
            error_response(status, &e.to_string())
        }
    }
}
