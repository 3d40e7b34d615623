use anyhow::anyhow;
use axum::http::StatusCode;
use skadi_auth::TokenError;
use skadi_cache::CacheError;
use skadi_core::{AppError, PasswordError};
use skadi_db::RepositoryError;

/// Failures of the authentication service.
///
/// Only the conversion into [`AppError`] decides HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid password")]
    InvalidCredentials,

    #[error("user not found")]
    NotFound,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("storage unavailable")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn missing_token() -> Self {
        AuthError::Unauthorized("token: missing".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials | AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::NotFound => StatusCode::NOT_FOUND,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
            AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(reason) => AuthError::Internal(reason),
            other => AuthError::Unauthorized(format!("token: {other}")),
        }
    }
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        AuthError::StoreUnavailable(err.to_string())
    }
}

impl From<CacheError> for AuthError {
    fn from(err: CacheError) -> Self {
        AuthError::StoreUnavailable(err.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let status = err.status();
        match err {
            AuthError::StoreUnavailable(cause) => {
                tracing::error!(cause = %cause, "Storage unavailable");
                AppError::new(status, anyhow!("storage unavailable"))
            }
            other => AppError::new(status, anyhow!(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skadi_auth::TokenKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::missing_token().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::Forbidden("token is in blacklist".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthError::StoreUnavailable("timeout".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        for err in [
            TokenError::Malformed,
            TokenError::SignatureInvalid,
            TokenError::Expired,
            TokenError::KindMismatch {
                expected: TokenKind::Refresh,
            },
        ] {
            let auth_err = AuthError::from(err);
            assert_eq!(auth_err.status(), StatusCode::UNAUTHORIZED);
            assert!(auth_err.to_string().starts_with("token: "));
        }

        assert_eq!(
            AuthError::from(TokenError::Expired).to_string(),
            "token: expired"
        );
    }

    #[test]
    fn test_signing_failure_is_internal() {
        let err = AuthError::from(TokenError::Signing("bad key".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_failure_hides_cause() {
        let app_err = AppError::from(AuthError::from(CacheError::Timeout));
        assert_eq!(app_err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(app_err.error.to_string(), "storage unavailable");
    }
}
