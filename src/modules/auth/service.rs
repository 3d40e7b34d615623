//! Authentication service: login, logout and access-token renewal.
//!
//! Tokens come in pairs. The access token is short-lived and travels in the
//! `Authorization` header; the refresh token lives for days, travels in the
//! `refresh` cookie and can only mint new access tokens. Logging out puts the
//! refresh token on the blacklist for the whole refresh lifetime.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use skadi_auth::{TokenCodec, UserClaims};
use skadi_cache::RevocationStore;
use skadi_config::JwtConfig;
use skadi_core::verify_password;
use skadi_db::UserRepository;
use skadi_models::User;

use super::error::AuthError;
use crate::metrics::{
    track_jwt_issued, track_password_verify_duration, track_token_revoked,
    track_user_login_failure, track_user_login_success,
};

/// Access and refresh token issued together at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone)]
pub struct UserWithToken {
    pub user: User,
    pub token: TokenPair,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    blacklist: Arc<dyn RevocationStore>,
    access: TokenCodec,
    refresh: TokenCodec,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("access", &self.access)
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        blacklist: Arc<dyn RevocationStore>,
        jwt_config: &JwtConfig,
    ) -> Self {
        Self::with_codecs(
            users,
            blacklist,
            TokenCodec::access(jwt_config),
            TokenCodec::refresh(jwt_config),
        )
    }

    pub fn with_codecs(
        users: Arc<dyn UserRepository>,
        blacklist: Arc<dyn RevocationStore>,
        access: TokenCodec,
        refresh: TokenCodec,
    ) -> Self {
        Self {
            users,
            blacklist,
            access,
            refresh,
        }
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh.ttl()
    }

    /// Checks the credentials and issues a fresh token pair.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotFound`] if no user has this username
    /// - [`AuthError::InvalidCredentials`] if the password does not match
    /// - [`AuthError::StoreUnavailable`] if the user lookup fails
    #[instrument(skip(self, raw_password))]
    pub async fn log_in(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<UserWithToken, AuthError> {
        let Some(record) = self.users.find_by_username(username).await? else {
            track_user_login_failure("user_not_found");
            return Err(AuthError::NotFound);
        };

        let stored_hash = record.password_hash.clone();
        let raw = raw_password.to_owned();
        let started = Instant::now();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(raw.as_bytes(), &stored_hash))
                .await
                .map_err(|e| AuthError::Internal(format!("password check aborted: {e}")))?;
        track_password_verify_duration(started.elapsed());

        if !matches {
            warn!(user_id = record.id, "Login rejected: invalid password");
            track_user_login_failure("invalid_password");
            return Err(AuthError::InvalidCredentials);
        }

        let claims = UserClaims {
            id: record.id,
            role: record.role,
        };
        let token = TokenPair {
            access: self.access.issue(&claims)?,
            refresh: self.refresh.issue(&claims)?,
        };
        track_jwt_issued(self.access.kind());
        track_jwt_issued(self.refresh.kind());
        track_user_login_success(claims.role.as_str());

        info!(user_id = record.id, role = %record.role, "User logged in");

        Ok(UserWithToken {
            user: User::from(record),
            token,
        })
    }

    /// Revokes a refresh token for the full refresh lifetime.
    ///
    /// Revoking a token twice succeeds.
    #[instrument(skip_all)]
    pub async fn log_out(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.blacklist
            .revoke(refresh_token, self.refresh.ttl())
            .await?;
        track_token_revoked();
        debug!("Refresh token revoked");
        Ok(())
    }

    /// Issues a new access token for already authenticated claims.
    ///
    /// The refresh token is not rotated.
    pub fn obtain_access(&self, claims: &UserClaims) -> Result<String, AuthError> {
        let token = self.access.issue(claims)?;
        track_jwt_issued(self.access.kind());
        Ok(token)
    }

    pub fn authenticate_access(&self, token: &str) -> Result<UserClaims, AuthError> {
        Ok(self.access.verify(token)?)
    }

    /// Verifies a refresh token and checks it against the blacklist.
    ///
    /// # Errors
    ///
    /// [`AuthError::Forbidden`] if the token was revoked,
    /// [`AuthError::StoreUnavailable`] if the blacklist cannot be queried.
    pub async fn authenticate_refresh(&self, token: &str) -> Result<UserClaims, AuthError> {
        let claims: UserClaims = self.refresh.verify(token)?;

        if self.blacklist.is_revoked(token).await? {
            warn!(user_id = claims.id, "Revoked refresh token presented");
            return Err(AuthError::Forbidden("token is in blacklist".into()));
        }

        Ok(claims)
    }
}
