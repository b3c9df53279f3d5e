use bcrypt::{hash, verify};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password")]
    HashingFailed(#[source] bcrypt::BcryptError),
    #[error("Failed to verify password")]
    VerificationFailed(#[source] bcrypt::BcryptError),
    #[error("Password worker task failed")]
    WorkerFailed(#[from] tokio::task::JoinError),
}

/// Hash a password using bcrypt with the given cost
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    hash(password, cost).map_err(PasswordError::HashingFailed)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    verify(password, hash).map_err(PasswordError::VerificationFailed)
}

/// [`hash_password`] on the blocking pool; bcrypt is deliberately slow.
pub async fn hash_password_async(password: String, cost: u32) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost)).await?
}

/// [`verify_password`] on the blocking pool.
pub async fn verify_password_async(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?
}
