use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Lifetime of a token issued without "remember me".
pub const SHORT_TOKEN_HOURS: i64 = 1;
/// Lifetime of a token issued with "remember me".
pub const LONG_TOKEN_DAYS: i64 = 7;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("Invalid or expired token")]
    Invalid(jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a string.
    pub sub: String,
    pub id: i64,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 tokens for the JSON auth surface.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
}

impl TokenService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn issue(&self, user: &User, remember_me: bool) -> Result<String, TokenError> {
        let now = Utc::now();
        let lifetime = if remember_me {
            Duration::days(LONG_TOKEN_DAYS)
        } else {
            Duration::hours(SHORT_TOKEN_HOURS)
        };

        let claims = Claims {
            sub: user.id.to_string(),
            id: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            email: "admin@example.com".to_string(),
            password_hash: String::new(),
            name: Some("Admin".to_string()),
            role: "admin".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let service = TokenService::new("secret-a");
        let token = service.issue(&user(), false).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.id, 7);
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn remember_me_extends_to_seven_days() {
        let service = TokenService::new("secret-a");
        let claims = service
            .verify(&service.issue(&user(), true).unwrap())
            .unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenService::new("secret-a").issue(&user(), false).unwrap();
        let result = TokenService::new("secret-b").verify(&token);
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        let service = TokenService::new("secret-a");
        assert!(service.verify("not.a.token").is_err());
    }
}
