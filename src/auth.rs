// ABOUTME: JWT-based user authentication system with symmetric HS256 signing
// ABOUTME: Handles token generation, validation, and detailed validation errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Authentication and Session Management
//!
//! This module provides JWT-based authentication for the Meal Mind
//! server. Tokens are signed with the configured shared secret and
//! carry the user id, email, and username. Expiry is driven by the
//! active profile: development and testing issue tokens without an
//! `exp` claim, production issues short-lived tokens.

use crate::config::TokenExpiry;
use crate::errors::AppError;
use crate::models::User;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Convert a duration to a human-readable format
fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().abs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;

    if hours > 0 {
        format!("{hours} hours")
    } else if minutes > 0 {
        format!("{minutes} minutes")
    } else {
        format!("{total_secs} seconds")
    }
}

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let duration_expired = current_time.signed_duration_since(*expired_at);
                write!(
                    f,
                    "JWT token expired {} ago at {}",
                    humanize_duration(duration_expired),
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Username for display
    pub username: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp, absent for tokens that never expire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Authentication result with the verified token identity
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user `ID`
    pub user_id: Uuid,
    /// Email carried in the token claims
    pub email: String,
    /// Username carried in the token claims
    pub username: String,
}

/// Authentication manager for `JWT` tokens
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry: TokenExpiry,
    /// Monotonic counter to ensure unique timestamps for tokens
    token_counter: AtomicU64,
}

impl Clone for AuthManager {
    fn clone(&self) -> Self {
        Self {
            jwt_secret: self.jwt_secret.clone(),
            token_expiry: self.token_expiry,
            // Start fresh counter for cloned instance - this is acceptable
            // since each instance will maintain uniqueness independently
            token_counter: AtomicU64::new(0),
        }
    }
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry: TokenExpiry) -> Self {
        Self {
            jwt_secret: jwt_secret.to_vec(),
            token_expiry,
            token_counter: AtomicU64::new(0),
        }
    }

    /// Generate a `JWT` token for a user with HS256 symmetric signing
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails due to invalid claims
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();

        // Use atomic counter to ensure unique issued-at times
        let counter = self.token_counter.fetch_add(1, Ordering::Relaxed);
        let unique_iat =
            now.timestamp() * 1000 + i64::from(u32::try_from(counter % 1000).unwrap_or(0));

        let exp = match self.token_expiry {
            TokenExpiry::Never => None,
            TokenExpiry::Seconds(secs) => {
                let lifetime = Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX / 1000));
                Some((now + lifetime).timestamp())
            }
        };

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            iat: unique_iat,
            exp,
        };

        let encoding_key = EncodingKey::from_secret(&self.jwt_secret);
        let token = encode(&Header::default(), &claims, &encoding_key)?;

        Ok(token)
    }

    /// Validate an HS256 `JWT` token with detailed error information
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] if:
    /// - Token signature is invalid
    /// - Token has expired
    /// - Token is malformed or not valid `JWT` format
    /// - Token claims cannot be deserialized
    pub fn validate_token_detailed(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let claims = self.decode_token_claims(token)?;
        Self::validate_claims_expiry(&claims)?;

        tracing::debug!("JWT token validation successful for user: {}", claims.sub);
        Ok(claims)
    }

    /// Authenticate a bearer `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns an [`AppError`] ready for the HTTP layer: 401 variants for
    /// missing, non-bearer, expired, malformed, or invalid credentials
    pub fn authenticate(&self, auth_header: Option<&str>) -> Result<AuthResult, AppError> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;
        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::auth_invalid("Authorization header must use the Bearer scheme")
        })?;

        let claims = self.validate_token_detailed(token).map_err(|e| match e {
            JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
            JwtValidationError::TokenMalformed { details } => AppError::auth_malformed(details),
            JwtValidationError::TokenInvalid { reason } => AppError::auth_invalid(reason),
        })?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a valid user id"))?;

        Ok(AuthResult {
            user_id,
            email: claims.email,
            username: claims.username,
        })
    }

    /// Decode `JWT` token claims without expiration validation
    ///
    /// Expiry is checked separately so tokens without an `exp` claim
    /// stay valid and expired tokens produce a detailed error.
    fn decode_token_claims(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let decoding_key = DecodingKey::from_secret(&self.jwt_secret);

        let mut validation_no_exp = Validation::new(Algorithm::HS256);
        validation_no_exp.validate_exp = false;
        validation_no_exp.set_required_spec_claims::<&str>(&[]);

        decode::<Claims>(token, &decoding_key, &validation_no_exp)
            .map(|token_data| token_data.claims)
            .map_err(|e| Self::convert_jwt_error(&e))
    }

    /// Validate claims expiration with detailed logging
    fn validate_claims_expiry(claims: &Claims) -> Result<(), JwtValidationError> {
        let Some(exp) = claims.exp else {
            return Ok(());
        };

        let current_time = Utc::now();
        if current_time.timestamp() > exp {
            let expired_at = DateTime::from_timestamp(exp, 0).unwrap_or_else(Utc::now);
            let time_since_expiry = current_time.signed_duration_since(expired_at);
            tracing::warn!(
                "JWT token expired for user: {} - Expired {} ago at {}",
                claims.sub,
                humanize_duration(time_since_expiry),
                expired_at.to_rfc3339()
            );
            return Err(JwtValidationError::TokenExpired {
                expired_at,
                current_time,
            });
        }

        Ok(())
    }

    /// Convert JWT library errors to detailed validation errors
    fn convert_jwt_error(e: &jsonwebtoken::errors::Error) -> JwtValidationError {
        use jsonwebtoken::errors::ErrorKind;
        tracing::warn!("JWT token validation failed: {:?}", e);

        match e.kind() {
            ErrorKind::InvalidSignature => JwtValidationError::TokenInvalid {
                reason: "Token signature verification failed".into(),
            },
            ErrorKind::InvalidToken => JwtValidationError::TokenMalformed {
                details: "Token format is invalid".into(),
            },
            ErrorKind::Base64(base64_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid base64: {base64_err}"),
            },
            ErrorKind::Json(json_err) => JwtValidationError::TokenMalformed {
                details: format!("Token contains invalid JSON: {json_err}"),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: format!("Token validation failed: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn test_user() -> User {
        User::new(
            "athlete@example.com".to_string(),
            "athlete".to_string(),
            "hashed".to_string(),
        )
    }

    fn manager(expiry: TokenExpiry) -> AuthManager {
        AuthManager::new(b"unit-test-secret", expiry)
    }

    #[test]
    fn token_roundtrip_preserves_identity() {
        let user = test_user();
        let auth = manager(TokenExpiry::Seconds(3600));

        let token = auth.generate_token(&user).unwrap();
        let claims = auth.validate_token_detailed(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, "athlete@example.com");
        assert_eq!(claims.username, "athlete");
        assert!(claims.exp.is_some());
    }

    #[test]
    fn never_expiring_token_has_no_exp_claim() {
        let user = test_user();
        let auth = manager(TokenExpiry::Never);

        let token = auth.generate_token(&user).unwrap();
        let claims = auth.validate_token_detailed(&token).unwrap();

        assert_eq!(claims.exp, None);
    }

    #[test]
    fn expired_token_is_rejected_with_detail() {
        let user = test_user();
        let auth = manager(TokenExpiry::Seconds(0));

        let token = auth.generate_token(&user).unwrap();
        // A zero-lifetime token expires as soon as the clock ticks over
        std::thread::sleep(std::time::Duration::from_millis(1100));

        match auth.validate_token_detailed(&token) {
            Err(JwtValidationError::TokenExpired { .. }) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let user = test_user();
        let auth = manager(TokenExpiry::Never);
        let other = AuthManager::new(b"different-secret", TokenExpiry::Never);

        let token = other.generate_token(&user).unwrap();
        assert!(auth.validate_token_detailed(&token).is_err());
    }

    #[test]
    fn garbage_token_reports_malformed() {
        let auth = manager(TokenExpiry::Never);

        match auth.validate_token_detailed("not-a-jwt") {
            Err(JwtValidationError::TokenMalformed { .. } | JwtValidationError::TokenInvalid { .. }) => {}
            other => panic!("expected malformed or invalid, got {other:?}"),
        }
    }

    #[test]
    fn authenticate_requires_bearer_scheme() {
        use crate::errors::ErrorCode;

        let user = test_user();
        let auth = manager(TokenExpiry::Never);
        let token = auth.generate_token(&user).unwrap();

        let result = auth.authenticate(Some(&format!("Bearer {token}"))).unwrap();
        assert_eq!(result.user_id, user.id);
        assert_eq!(result.email, user.email);

        let missing = auth.authenticate(None).unwrap_err();
        assert_eq!(missing.code, ErrorCode::AuthRequired);

        let basic = auth.authenticate(Some("Basic dXNlcjpwdw==")).unwrap_err();
        assert_eq!(basic.code, ErrorCode::AuthInvalid);
    }
}
