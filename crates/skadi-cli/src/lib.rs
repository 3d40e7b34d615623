//! # Skadi CLI
//!
//! Account provisioning used by the `skadi-cli` binary.
//!
//! ```ignore
//! use skadi_cli::{provision_user, DEFAULT_COST};
//!
//! let record = provision_user(&repo, "jdoe", "s3cret-pass", UserRole::Teacher, DEFAULT_COST).await?;
//! ```

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};

use skadi_auth::UserRole;
use skadi_core::{PasswordError, check_password_strength, hash_password_with_cost};
use skadi_db::{RepositoryError, UserRepository};
use skadi_models::{CredentialRecord, NewUser};

pub use bcrypt::DEFAULT_COST;

pub const MAX_USERNAME_LEN: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("username must be 1 to {MAX_USERNAME_LEN} characters")]
    InvalidUsername,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("username is already taken")]
    Duplicate,

    #[error("password hashing aborted")]
    Aborted,

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ProvisionError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate => Self::Duplicate,
            other => Self::Repository(other),
        }
    }
}

pub fn check_username(username: &str) -> Result<(), ProvisionError> {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN || username.trim() != username {
        return Err(ProvisionError::InvalidUsername);
    }
    Ok(())
}

/// Validates the credentials, hashes the password and stores the account.
pub async fn provision_user(
    users: &dyn UserRepository,
    username: &str,
    password: &str,
    role: UserRole,
    cost: u32,
) -> Result<CredentialRecord, ProvisionError> {
    check_username(username)?;
    check_password_strength(password)?;

    let raw = password.to_owned();
    let password_hash =
        tokio::task::spawn_blocking(move || hash_password_with_cost(raw.as_bytes(), cost))
            .await
            .map_err(|_| ProvisionError::Aborted)??;

    let record = users
        .create_user(NewUser {
            username: username.to_string(),
            password_hash,
            role,
        })
        .await?;
    Ok(record)
}

/// Fake username like `ada.lovelace.teacher`, unique enough for demo data.
pub fn demo_username(role: UserRole) -> String {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let mut username = format!("{first}.{last}.{role}")
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect::<String>();
    username.truncate(MAX_USERNAME_LEN);
    username
}
