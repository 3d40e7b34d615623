//! # Skadi Models
//!
//! Domain models and request/response DTOs for the Skadi API.
//!
//! - [`users`]: user accounts as stored and as shown to clients
//! - [`auth`]: login and token-renewal payloads

pub mod auth;
pub mod users;

pub use auth::{AccessTokenResponse, LoginRequest, LoginResponse};
pub use users::{CredentialRecord, NewUser, User};
