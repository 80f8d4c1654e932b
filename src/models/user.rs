//! Caller roles and token claims

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Permission grant attached to an authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[serde(alias = "ROLE_USER")]
    User,
    #[serde(alias = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JWT Claims for authenticated callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub roles: Vec<Role>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Claims for `sub` valid for `ttl_hours` from now
    pub fn new(sub: impl Into<String>, roles: Vec<Role>, ttl_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: sub.into(),
            roles,
            exp: now + (ttl_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn has_any_role(&self, required: &[Role]) -> bool {
        required.iter().any(|role| self.roles.contains(role))
    }

    /// Require at least one of `required`
    pub fn require_any_role(&self, required: &[Role]) -> Result<(), AppError> {
        if self.has_any_role(required) {
            Ok(())
        } else {
            let names: Vec<&str> = required.iter().map(Role::as_str).collect();
            Err(AppError::Authorization(format!(
                "One of the roles [{}] is required",
                names.join(", ")
            )))
        }
    }
}
