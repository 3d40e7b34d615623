//! # Skadi Auth
//!
//! Identity claims and the signed bearer-token codec used by the Skadi API.
//!
//! - [`claims`]: [`UserClaims`], [`UserRole`] and [`TokenKind`]
//! - [`jwt`]: issuing and verifying HS256 tokens
//!
//! # Example
//!
//! ```ignore
//! use skadi_auth::{TokenCodec, UserClaims, UserRole};
//! use skadi_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let access = TokenCodec::access(&config);
//!
//! let token = access.issue(&UserClaims { id: 1, role: UserRole::Admin })?;
//! let claims: UserClaims = access.verify(&token)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{TokenKind, UnknownRole, UserClaims, UserRole};
pub use jwt::{TokenClaims, TokenCodec, TokenError, issue, issue_at, verify, verify_at};
