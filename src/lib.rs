//! # Skadi API
//!
//! Authentication and authorization core of the Skadi school-management
//! backend, built with Axum, PostgreSQL and Redis.
//!
//! ## Overview
//!
//! - **Login**: username and password, checked against a bcrypt hash
//! - **Token pair**: a short-lived access token (`Authorization: Bearer`)
//!   and a long-lived refresh token (`refresh` cookie), signed with
//!   separate HS256 secrets
//! - **Logout**: the refresh token is blacklisted until it would have
//!   expired anyway
//! - **Roles**: `admin`, `teacher`, `student`, checked per route
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── skadi-core/      # AppError, password hashing
//! ├── skadi-config/    # JWT, cookie, CORS, server and logging config
//! ├── skadi-auth/      # Claims, roles, token codec
//! ├── skadi-cache/     # Redis client, revocation store
//! ├── skadi-db/        # Pool, credential repository
//! ├── skadi-models/    # Users and auth DTOs
//! └── skadi-cli/       # User provisioning
//! src/
//! ├── middleware/      # Token verification and role checks
//! ├── modules/
//! │   ├── auth/        # Login, obtain, logout
//! │   └── example/     # Role-check routes (debug only)
//! └── utils/           # Refresh cookie
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration
//!
//! ## Authentication Flow
//!
//! ```text
//! POST /api/v1/auth/login            -> {user, access_token} + Set-Cookie: refresh
//! GET  /api/v1/<protected>           Authorization: Bearer <access_token>
//! GET  /api/v1/auth/private/obtain   Cookie: refresh  -> {access_token}
//! GET  /api/v1/auth/private/logout   Cookie: refresh  -> 204, cookie cleared
//! ```
//!
//! ## Protecting Routes
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use skadi::middleware::{auth::{AuthUser, require_access}, role::require_teacher};
//!
//! async fn grades(AuthUser(claims): AuthUser) -> String {
//!     format!("grades for teacher {}", claims.id)
//! }
//!
//! let routes = Router::new()
//!     .route("/grades", get(grades))
//!     .route_layer(middleware::from_fn(require_teacher))
//!     .route_layer(middleware::from_fn_with_state(state, require_access));
//! ```
//!
//! ## Configuration
//!
//! Read from the environment (and `.env`) at startup. Required:
//!
//! - `DATABASE_URL`
//! - `JWT_ACCESS_SECRET`, `JWT_REFRESH_SECRET` (must differ)
//!
//! Everything else has a default; see `skadi-config`, `skadi-cache::config`
//! and `skadi-db::config`.

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
