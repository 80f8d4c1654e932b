//! Authentication service

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};

use crate::{
    config::{AccountConfig, AuthConfig},
    error::{AppError, AppResult},
    models::UserClaims,
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Token lifetime in seconds
    pub fn token_ttl_seconds(&self) -> u64 {
        self.config.jwt_expiration_hours * 3600
    }

    /// Authenticate a configured account and return a JWT token
    pub fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        let account = self
            .config
            .accounts
            .iter()
            .find(|a| a.username == username)
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !Self::verify_password(account, password)? {
            tracing::warn!("Rejected login for {}", username);
            return Err(AppError::Authentication("Invalid login or password".to_string()));
        }

        let claims = UserClaims::new(
            account.username.clone(),
            account.roles.clone(),
            self.config.jwt_expiration_hours,
        );
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("Issued token for {} with roles {:?}", username, account.roles);
        Ok(token)
    }

    fn verify_password(account: &AccountConfig, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&account.password_hash).map_err(|_| {
            AppError::Internal(format!("Invalid password hash for {}", account.username))
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
