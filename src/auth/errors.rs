use thiserror::Error;

use crate::auth::password::PasswordError;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email and wrong password deliberately share this variant.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("A user with this email already exists")]
    EmailAlreadyExists,
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] PasswordError),
}
