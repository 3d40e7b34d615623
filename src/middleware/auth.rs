//! Request authentication.
//!
//! Two middlewares attach the caller's identity to the request extensions:
//!
//! - [`require_access`] reads `Authorization: Bearer <token>` and verifies it
//!   as an access token.
//! - [`require_refresh`] reads the `refresh` cookie, verifies it as a refresh
//!   token and rejects it if it has been revoked.
//!
//! Handlers then take [`AuthUser`] or [`RefreshSession`] as extractors.
//! The extractors never verify anything themselves; if the matching
//! middleware did not run they reject the request.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use tracing::error;

use skadi_auth::UserClaims;
use skadi_core::AppError;

use crate::modules::auth::AuthError;
use crate::state::AppState;
use crate::utils::cookie::REFRESH_COOKIE;

/// Identity from a verified access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserClaims);

/// Identity from a verified, non-revoked refresh token, with the raw token
/// kept for logout.
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub claims: UserClaims,
    pub token: String,
}

impl std::fmt::Debug for RefreshSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshSession")
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

/// The scheme match is case-sensitive: only `Bearer ` is accepted.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_access(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = bearer_token(req.headers()).ok_or_else(AuthError::missing_token)?;
        state.auth.authenticate_access(token)?
    };

    req.extensions_mut().insert(AuthUser(claims));
    Ok(next.run(req).await)
}

pub async fn require_refresh(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = CookieJar::from_headers(req.headers())
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_owned())
        .filter(|token| !token.is_empty())
        .ok_or_else(AuthError::missing_token)?;

    let claims = state.auth.authenticate_refresh(&token).await?;

    req.extensions_mut()
        .insert(RefreshSession { claims, token });
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().copied().ok_or_else(|| {
            error!(path = %parts.uri.path(), "AuthUser requested on a route without require_access");
            AppError::from(AuthError::missing_token())
        })
    }
}

impl<S> FromRequestParts<S> for RefreshSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<RefreshSession>().cloned().ok_or_else(|| {
            error!(path = %parts.uri.path(), "RefreshSession requested on a route without require_refresh");
            AppError::from(AuthError::missing_token())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer a.b.c")), Some("a.b.c"));
        assert_eq!(bearer_token(&headers("Bearer   a.b.c ")), Some("a.b.c"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("a.b.c")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("bearer a.b.c")), None);
        assert_eq!(bearer_token(&headers("BEARER a.b.c")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = RefreshSession {
            claims: UserClaims {
                id: 1,
                role: skadi_auth::UserRole::Student,
            },
            token: "secret.refresh.token".into(),
        };
        assert!(!format!("{session:?}").contains("secret.refresh.token"));
    }
}
