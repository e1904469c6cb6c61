use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::time::Duration;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{Role, TokenClaims};

/// A freshly signed bearer token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: u64,
}

/// Issues signed, time-limited bearer tokens carrying {userId, email, role}
pub struct TokenService {
    encoding_key: EncodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: config.token_ttl,
        }
    }

    pub fn issue(&self, user_id: i64, email: &str, role: Role) -> Result<IssuedToken> {
        let now = Utc::now().timestamp().max(0) as u64;
        let expires_in = self.ttl.as_secs();
        let exp = now
            .checked_add(expires_in)
            .ok_or_else(|| AppError::Internal("Token lifetime overflows expiry".to_string()))?;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        tracing::debug!("Issued token for user {} (expires in {}s)", user_id, expires_in);

        Ok(IssuedToken { token, expires_in })
    }
}
