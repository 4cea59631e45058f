// src/services/token_service.rs
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{AppError, AppResult};

/// Lifetime of every access token handed out by `/auth/login`.
pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, malformed, or expired. Callers cannot tell which.
    #[error("invalid token")]
    InvalidToken,
}

impl From<TokenError> for AppError {
    fn from(_: TokenError) -> Self {
        AppError::unauthorized("Could not validate credentials")
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// subject / user email
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and checks HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn access_token_ttl() -> Duration {
        Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)
    }

    pub fn issue(&self, identity: &str, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|_| TokenError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-that-is-long-enough-for-hmac")
    }

    #[test]
    fn issued_token_resolves_to_identity() {
        let svc = service();
        let token = svc
            .issue("alice@example.com", TokenService::access_token_ttl())
            .unwrap();
        assert_eq!(svc.verify(&token).unwrap(), "alice@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service();
        let token = svc.issue("alice@example.com", Duration::seconds(-5)).unwrap();
        assert_eq!(svc.verify(&token), Err(TokenError::InvalidToken));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let svc = service();
        let token = svc
            .issue("alice@example.com", TokenService::access_token_ttl())
            .unwrap();

        let (head, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('A') { "B" } else { "A" };
        let forged = format!("{}.{}{}", head, flipped, &sig[1..]);

        assert_eq!(svc.verify(&forged), Err(TokenError::InvalidToken));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = TokenService::new("some-other-secret");
        let token = other
            .issue("alice@example.com", TokenService::access_token_ttl())
            .unwrap();
        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        let svc = service();
        assert!(svc.verify("").is_err());
        assert!(svc.verify("not.a.jwt").is_err());
    }

    #[test]
    fn ttl_is_thirty_minutes() {
        let svc = service();
        let token = svc.issue("bob@example.com", TokenService::access_token_ttl()).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret-that-is-long-enough-for-hmac"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 30 * 60);
    }
}
