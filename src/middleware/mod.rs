//! Middleware for request processing.
//!
//! - [`auth`]: token verification and the identity extractors
//! - [`role`]: role checks on top of an authenticated identity
//!
//! # Flow
//!
//! 1. `require_access` (header) or `require_refresh` (cookie) verifies the
//!    token and inserts the identity into the request extensions
//! 2. `require_admin` / `require_teacher` / `require_student` check its role
//! 3. The handler reads the identity with the `AuthUser` or `RefreshSession`
//!    extractor
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn profile(AuthUser(claims): AuthUser) -> impl IntoResponse {
//!     Json(claims)
//! }
//! ```

pub mod auth;
pub mod role;
