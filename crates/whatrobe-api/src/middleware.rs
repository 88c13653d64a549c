//! Request plumbing: CORS and caller identity.
use axum::{extract::FromRequestParts, http::request::Parts};
use std::convert::Infallible;
use tower_http::cors::CorsLayer;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ANONYMOUS_USER: &str = "anonymous";

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

/// Opaque owner id from the `X-User-ID` header, `anonymous` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(ANONYMOUS_USER);
        Ok(Self(user.to_string()))
    }
}
