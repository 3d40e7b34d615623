pub mod controller;
pub mod error;
pub mod router;
pub mod service;

pub use error::AuthError;
pub use service::{AuthService, TokenPair, UserWithToken};
