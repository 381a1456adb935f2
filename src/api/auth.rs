// Basic auth gate for the API namespace

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hyper::header::AUTHORIZATION;
use hyper::HeaderMap;
use subtle::ConstantTimeEq;

/// Extract `(user, password)` from an `Authorization: Basic ...` header
pub fn parse_basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// Constant-time comparison; length mismatch still runs a comparison
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Whether the request carries the configured credentials
pub fn is_authorized(headers: &HeaderMap, username: &str, password: &str) -> bool {
    let Some((user, pass)) = parse_basic_auth(headers) else {
        return false;
    };
    // Evaluate both halves so timing does not reveal which one failed
    let user_ok = constant_time_eq(&user, username);
    let pass_ok = constant_time_eq(&pass, password);
    user_ok & pass_ok
}
