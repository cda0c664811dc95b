//! Password digesting and admin-token middleware.
//!
//! The store only ever sees opaque password hashes; plaintext passwords
//! stop here, at the API boundary. The admin token protects every /api
//! route and is compared in constant time.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;

use super::error::ApiError;
use crate::AppState;

/// Digest a plaintext password into the opaque hash the store works with.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Extract the bearer token or API key from request headers.
fn extract_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    if let Some(auth_header) = headers.get("Authorization").and_then(|h| h.to_str().ok()) {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            return Some(token);
        }
    }

    headers.get("X-API-Key").and_then(|h| h.to_str().ok())
}

/// Middleware guarding the protected API surface with the admin token.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing API token"))?;

    // Constant-time comparison to prevent timing attacks
    let admin_token = state.config.auth.admin_token.as_bytes();
    let provided = token.as_bytes();
    let matches = admin_token.len() == provided.len() && bool::from(admin_token.ct_eq(provided));

    if !matches {
        return Err(ApiError::unauthorized("Invalid API token"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_and_hex() {
        let a = hash_password("s3cret-password");
        let b = hash_password("s3cret-password");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn different_passwords_hash_differently() {
        assert_ne!(hash_password("one"), hash_password("two"));
    }

    #[test]
    fn token_extraction_prefers_bearer() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert("Authorization", "Bearer abc123".parse().unwrap());
        headers.insert("X-API-Key", "fallback".parse().unwrap());
        assert_eq!(extract_token(&headers), Some("abc123"));

        let mut headers = axum::http::HeaderMap::new();
        headers.insert("X-API-Key", "fallback".parse().unwrap());
        assert_eq!(extract_token(&headers), Some("fallback"));

        assert_eq!(extract_token(&axum::http::HeaderMap::new()), None);
    }
}
