//! Bearer token check for `POST /mcp`.

use axum::http::{header, HeaderMap, StatusCode};

/// Accepts `Authorization: Bearer <token>` when `<token>` equals `expected`.
///
/// The scheme name is matched case-insensitively; the token is compared
/// in full without short-circuiting on the first differing byte.
///
/// # Errors
///
/// `StatusCode::UNAUTHORIZED` when the header is absent, uses another
/// scheme, or carries a different token.
pub(crate) fn validate_bearer(headers: &HeaderMap, expected: &str) -> Result<(), StatusCode> {
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim());

    match provided {
        Some(token) if tokens_match(token.as_bytes(), expected.as_bytes()) => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

fn tokens_match(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn valid_bearer_passes() {
        assert!(validate_bearer(&with_auth("Bearer secret123"), "secret123").is_ok());
        assert!(validate_bearer(&with_auth("bearer secret123"), "secret123").is_ok());
    }

    #[test]
    fn wrong_or_partial_token_rejected() {
        assert!(validate_bearer(&with_auth("Bearer wrong"), "secret123").is_err());
        assert!(validate_bearer(&with_auth("Bearer secret"), "secret123").is_err());
    }

    #[test]
    fn missing_header_rejected() {
        assert!(validate_bearer(&HeaderMap::new(), "secret123").is_err());
    }

    #[test]
    fn basic_auth_scheme_rejected() {
        assert!(validate_bearer(&with_auth("Basic secret123"), "secret123").is_err());
    }
}
