use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::JwtConfig;
use crate::core::error::AuthError;
use crate::models::user::User;

/// Minimum signing secret length in bytes for HS256
pub const MIN_SECRET_BYTES: usize = 32;

/// JWT payload identifying a logged-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID as text (claims are always strings on the wire)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Email
    pub email: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user ID
    pub fn user_id(&self) -> Result<u32, AuthError> {
        self.sub.parse().map_err(|_| AuthError::InvalidToken)
    }
}

/// Issues and verifies signed identity tokens.
///
/// Read-only after construction; safe to share across handler tasks.
pub struct TokenIssuer {
    secret: String,
    issuer: String,
    audience: String,
    expires_minutes: i64,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            expires_minutes: config.expires_minutes,
        }
    }

    /// Issue a signed token for a user.
    ///
    /// The secret length is checked before any signing attempt; a short
    /// secret is a configuration error and no token is ever produced.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let key = self.secret.as_bytes();

        if key.len() < MIN_SECRET_BYTES {
            return Err(AuthError::SecretTooShort {
                min: MIN_SECRET_BYTES,
                actual: key.len(),
            });
        }

        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expires_minutes)).timestamp(),
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(key))
            .map_err(AuthError::from)
    }

    /// Decode and verify a token, checking signature, expiry, issuer and
    /// audience
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }
}
