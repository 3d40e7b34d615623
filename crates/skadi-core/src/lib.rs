//! # Skadi Core
//!
//! Core types shared by every crate of the Skadi API.
//!
//! - [`errors`]: the HTTP-facing [`AppError`] type
//! - [`password`]: bcrypt hashing, verification and the password-strength rule
//!
//! # Example
//!
//! ```ignore
//! use skadi_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password(b"qwerty123")?;
//! assert!(verify_password(b"qwerty123", &hash));
//!
//! let error = AppError::forbidden("token is in blacklist");
//! ```

pub mod errors;
pub mod password;

pub use errors::AppError;
pub use password::{
    PasswordError, check_password_strength, hash_password, hash_password_with_cost,
    verify_password,
};
