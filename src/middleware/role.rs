//! Role-based authorization.
//!
//! Runs after [`require_access`](crate::middleware::auth::require_access) and
//! reads the [`AuthUser`] it attached. A wrong role is `403 Forbidden`. A
//! request without an `AuthUser` means the route was wired without
//! authentication; it is rejected with `401` rather than let through.
//!
//! ```rust,ignore
//! use axum::{Router, middleware, routing::get};
//! use crate::middleware::{auth::require_access, role::require_teacher};
//!
//! let routes = Router::new()
//!     .route("/grades", get(grades))
//!     .route_layer(middleware::from_fn(require_teacher))
//!     .route_layer(middleware::from_fn_with_state(state, require_access));
//! ```

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use skadi_auth::{UserClaims, UserRole};
use skadi_core::AppError;

use crate::metrics::track_authorization_check;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::AuthError;

pub async fn require_roles(
    req: Request,
    next: Next,
    allowed_roles: &[UserRole],
) -> Result<Response, AppError> {
    let Some(AuthUser(claims)) = req.extensions().get::<AuthUser>().copied() else {
        error!(path = %req.uri().path(), "Role check on a route without require_access");
        return Err(AuthError::missing_token().into());
    };

    check_any_role(&claims, allowed_roles)?;

    Ok(next.run(req).await)
}

pub async fn require_admin(req: Request, next: Next) -> Response {
    require_roles(req, next, &[UserRole::Admin])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_teacher(req: Request, next: Next) -> Response {
    require_roles(req, next, &[UserRole::Teacher])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

pub async fn require_student(req: Request, next: Next) -> Response {
    require_roles(req, next, &[UserRole::Student])
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Fails with 403 unless the claims hold `role`.
pub fn check_role(claims: &UserClaims, role: UserRole) -> Result<(), AppError> {
    check_any_role(claims, &[role])
}

pub fn check_any_role(claims: &UserClaims, roles: &[UserRole]) -> Result<(), AppError> {
    let allowed = roles.contains(&claims.role);
    track_authorization_check(allowed, claims.role.as_str());

    if allowed {
        return Ok(());
    }

    let required = roles
        .iter()
        .map(UserRole::as_str)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(AppError::forbidden(format!(
        "access denied: {required} role required"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn claims(role: UserRole) -> UserClaims {
        UserClaims { id: 1, role }
    }

    #[test]
    fn test_check_role() {
        assert!(check_role(&claims(UserRole::Admin), UserRole::Admin).is_ok());

        let err = check_role(&claims(UserRole::Student), UserRole::Admin).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.error.to_string(), "access denied: admin role required");
    }

    #[test]
    fn test_check_any_role() {
        let staff = [UserRole::Admin, UserRole::Teacher];

        assert!(check_any_role(&claims(UserRole::Teacher), &staff).is_ok());
        assert!(check_any_role(&claims(UserRole::Admin), &staff).is_ok());

        let err = check_any_role(&claims(UserRole::Student), &staff).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(
            err.error.to_string(),
            "access denied: admin or teacher role required"
        );
    }

    #[test]
    fn test_empty_role_list_denies_everyone() {
        for role in UserRole::ALL {
            assert!(check_any_role(&claims(role), &[]).is_err());
        }
    }
}
