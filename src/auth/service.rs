use sqlx::PgPool;

use crate::auth::password::{hash_password_async, verify_password_async, PasswordError};
use crate::auth::{AuthError, LoginRequest, RegisterRequest};
use crate::models::User;

const USER_COLUMNS: &str = "id, email, password_hash, name, created_at";

/// Owns the `users` table: registration and credential checks.
#[derive(Debug, Clone)]
pub struct AuthService {
    db: PgPool,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(db: PgPool, bcrypt_cost: u32) -> Self {
        Self { db, bcrypt_cost }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        request.validate()?;
        let email = request.email.trim().to_string();

        // Check if user already exists
        if self.get_user_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = hash_password_async(request.password, self.bcrypt_cost).await?;

        let query = format!(
            "INSERT INTO users (email, password_hash, name)
             VALUES ($1, $2, $3)
             RETURNING {}",
            USER_COLUMNS
        );

        // The unique index still arbitrates a registration racing the lookup above
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&email)
            .bind(&password_hash)
            .bind(request.name.trim())
            .fetch_one(&self.db)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AuthError::EmailAlreadyExists
                }
                other => AuthError::Database(other),
            })?;

        tracing::info!(user_id = user.id, "Registered new user");
        Ok(user)
    }

    /// Check an email/password pair. Unknown emails and wrong passwords are
    /// reported identically.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<User, AuthError> {
        let user = match self.get_user_by_email(request.email.trim()).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown email");
                return Err(AuthError::InvalidCredentials);
            }
        };

        match verify_password_async(request.password, user.password_hash.clone()).await {
            Ok(true) => Ok(user),
            Ok(false) => {
                tracing::warn!(user_id = user.id, "Login attempt with wrong password");
                Err(AuthError::InvalidCredentials)
            }
            Err(PasswordError::VerificationFailed(err)) => {
                tracing::error!(user_id = user.id, "Stored password hash is unusable: {}", err);
                Err(AuthError::InvalidCredentials)
            }
            Err(err) => Err(AuthError::PasswordHashing(err)),
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }
}
