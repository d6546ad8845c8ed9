use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

/// The single implicit principal every token is issued for.
pub const TOKEN_IDENTITY: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: Uuid,
    #[serde(rename = "type")]
    pub token_type: String,
}

impl Claims {
    pub fn new(identity: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: identity.into(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: now
                .checked_add_signed(lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                .timestamp(),
            jti: Uuid::new_v4(),
            token_type: "access".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(#[source] jsonwebtoken::errors::Error),

    #[error("JWT_EXPIRY_MINUTES out of range: {0}")]
    InvalidLifetime(i64),

    #[error("Invalid JWT token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies bearer tokens with a shared HS256 secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
    configured: bool,
}

impl TokenIssuer {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
            configured: !secret.is_empty(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, TokenError> {
        let minutes = security.jwt_expiry_minutes;
        let lifetime = Duration::try_minutes(minutes).ok_or(TokenError::InvalidLifetime(minutes))?;
        Ok(Self::new(&security.jwt_secret, lifetime))
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Mint a token for the fixed identity. No credential is checked.
    pub fn issue(&self) -> Result<String, TokenError> {
        if !self.configured {
            return Err(TokenError::InvalidSecret);
        }

        let claims = Claims::new(TOKEN_IDENTITY, self.lifetime);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(TokenError::Generation)
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        if !self.configured {
            return Err(TokenError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(TokenError::Invalid)?;
        Ok(token_data.claims)
    }
}
