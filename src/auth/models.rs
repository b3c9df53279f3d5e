use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("email pattern is valid"));

/// Authentication request models
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(AuthError::Validation("Email cannot be empty".to_string()));
        }

        if !EMAIL_PATTERN.is_match(email) {
            return Err(AuthError::Validation("Invalid email format".to_string()));
        }

        if email.len() > 255 {
            return Err(AuthError::Validation(
                "Email cannot be longer than 255 characters".to_string(),
            ));
        }

        if self.password.is_empty() {
            return Err(AuthError::Validation("Password cannot be empty".to_string()));
        }

        // bcrypt only looks at the first 72 bytes
        if self.password.len() > 72 {
            return Err(AuthError::Validation(
                "Password cannot be longer than 72 bytes".to_string(),
            ));
        }

        if self.name.trim().is_empty() {
            return Err(AuthError::Validation("Name cannot be empty".to_string()));
        }

        if self.name.chars().count() > 255 {
            return Err(AuthError::Validation(
                "Name cannot be longer than 255 characters".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CheckAuthResponse {
    pub status: &'static str,
    pub user_id: i32,
}
