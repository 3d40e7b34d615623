use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use skadi_core::AppError;
use skadi_models::{AccessTokenResponse, LoginRequest, LoginResponse};

use crate::middleware::auth::RefreshSession;
use crate::state::AppState;
use crate::utils::cookie::{refresh_cookie, refresh_removal_cookie};
use crate::validator::ValidatedJson;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in with username and password
///
/// Returns the user and an access token; the refresh token is set in the
/// `refresh` cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Invalid password", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(username = %dto.username))]
pub async fn log_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let result = state.auth.log_in(&dto.username, &dto.password).await?;

    let cookie = refresh_cookie(
        &state.cookie_config,
        result.token.refresh,
        state.auth.refresh_ttl(),
    );

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: result.user,
            access_token: result.token.access,
        }),
    ))
}

/// Obtain a new access token with the refresh cookie
#[utoipa::path(
    get,
    path = "/api/v1/auth/private/obtain",
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 401, description = "Missing or invalid refresh token", body = ErrorResponse),
        (status = 403, description = "Refresh token revoked", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("refresh_cookie" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = session.claims.id))]
pub async fn obtain_access(
    State(state): State<AppState>,
    session: RefreshSession,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let access_token = state.auth.obtain_access(&session.claims)?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// Log out: revoke the refresh token and clear the cookie
#[utoipa::path(
    get,
    path = "/api/v1/auth/private/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Missing or invalid refresh token", body = ErrorResponse),
        (status = 403, description = "Refresh token already revoked", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse)
    ),
    security(("refresh_cookie" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all, fields(user_id = session.claims.id))]
pub async fn log_out(
    State(state): State<AppState>,
    jar: CookieJar,
    session: RefreshSession,
) -> Result<(CookieJar, StatusCode), AppError> {
    state.auth.log_out(&session.token).await?;

    let jar = jar.remove(refresh_removal_cookie(&state.cookie_config));
    Ok((jar, StatusCode::NO_CONTENT))
}
