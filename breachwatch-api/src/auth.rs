//! HTTP Basic authentication for admin routes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use subtle::ConstantTimeEq;
use tracing::{error, warn};

use crate::error::ApiError;
use crate::state::AppState;

const REALM: &str = r#"Basic realm="Admin Area""#;

/// Rejects the request unless it carries the configured admin credentials.
///
/// Answers 503 when the deployment has no admin credentials at all.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let Some((expected_user, expected_pass)) = state.config.admin_credentials() else {
        error!("Admin credentials are not configured");
        return ApiError::service_unavailable("Admin interface is not configured").into_response();
    };

    match basic_credentials(req.headers()) {
        Some((user, pass)) if credentials_match(&user, &pass, expected_user, expected_pass) => {
            next.run(req).await
        }
        Some(_) => {
            warn!("Failed admin authentication attempt");
            challenge()
        }
        None => challenge(),
    }
}

fn challenge() -> Response {
    let mut response = ApiError::unauthorized().into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM));
    response
}

fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn credentials_match(user: &str, pass: &str, expected_user: &str, expected_pass: &str) -> bool {
    // Both comparisons always run
    let user_ok = user.as_bytes().ct_eq(expected_user.as_bytes());
    let pass_ok = pass.as_bytes().ct_eq(expected_pass.as_bytes());
    (user_ok & pass_ok).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_basic_credentials_parse() {
        let encoded = STANDARD.encode("admin:pa:ss");
        let parsed = basic_credentials(&headers_with(&format!("Basic {encoded}")));
        assert_eq!(parsed, Some(("admin".into(), "pa:ss".into())));
    }

    #[test]
    fn test_basic_credentials_rejects_garbage() {
        assert!(basic_credentials(&HeaderMap::new()).is_none());
        assert!(basic_credentials(&headers_with("Bearer abc")).is_none());
        assert!(basic_credentials(&headers_with("Basic !!!")).is_none());
        let no_colon = STANDARD.encode("admin");
        assert!(basic_credentials(&headers_with(&format!("Basic {no_colon}"))).is_none());
    }

    #[test]
    fn test_credentials_match() {
        assert!(credentials_match("admin", "secret", "admin", "secret"));
        assert!(!credentials_match("admin", "secre", "admin", "secret"));
        assert!(!credentials_match("root", "secret", "admin", "secret"));
    }
}
