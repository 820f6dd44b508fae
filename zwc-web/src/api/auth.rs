//! Session check for protected routes
//!
//! When a session token is configured, requests must carry the cookie
//! `zwc_session=<token>`. Without a configured token the check is disabled.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{ApiError, AppState};

/// Session cookie name
pub const SESSION_COOKIE: &str = "zwc_session";

/// Value of cookie `name` in a `Cookie` header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Authentication middleware
///
/// Returns 401 Unauthorized if the session cookie is missing or wrong.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let expected = match state.settings.session_token.as_deref() {
        Some(token) if !token.is_empty() => token,
        // No token configured: pass through without validation
        _ => return Ok(next.run(request).await),
    };

    let provided = request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|header| cookie_value(header, SESSION_COOKIE));

    match provided {
        Some(value) if value == expected => Ok(next.run(request).await),
        Some(_) => {
            warn!("Rejected request to {}: invalid session", request.uri().path());
            Err(ApiError::Unauthorized("Invalid session".to_string()))
        }
        None => {
            warn!("Rejected request to {}: no session", request.uri().path());
            Err(ApiError::Unauthorized("Login required".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let header = "theme=dark; zwc_session=abc123; other=1";
        assert_eq!(cookie_value(header, SESSION_COOKIE), Some("abc123"));
        assert_eq!(cookie_value(header, "theme"), Some("dark"));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("", SESSION_COOKIE), None);
    }
}
