//! Verification of Supabase access tokens.
//!
//! Tokens are HS256-signed by the auth service with the project's JWT
//! secret. This service never issues tokens for users; [`sign_token`]
//! exists for service-to-service calls and tests.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stylisto_core::types::DbId;

/// Audience Supabase puts on tokens of signed-in users.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Subset of the Supabase claims this service relies on.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's UUID.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    pub aud: String,
    /// Postgres role, normally `"authenticated"`.
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the auth service.
    pub secret: String,
    /// Required `aud` claim.
    pub audience: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default         |
    /// |-------------------------|----------|-----------------|
    /// | `SUPABASE_JWT_SECRET`   | **yes**  | --              |
    /// | `SUPABASE_JWT_AUDIENCE` | no       | `authenticated` |
    ///
    /// # Panics
    ///
    /// Panics if `SUPABASE_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("SUPABASE_JWT_SECRET")
            .expect("SUPABASE_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SUPABASE_JWT_SECRET must not be empty");

        let audience =
            std::env::var("SUPABASE_JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        Self { secret, audience }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, expiry and audience.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[config.audience.as_str()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

/// Sign a token for `user_id` valid for `ttl_secs`.
pub fn sign_token(
    user_id: DbId,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + ttl_secs,
        iat: Some(now),
        aud: config.audience.clone(),
        role: Some(DEFAULT_AUDIENCE.to_string()),
        email: None,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }

    #[test]
    fn signed_token_validates() {
        let config = test_config();
        let user = DbId::new_v4();
        let token = sign_token(user, 300, &config).unwrap();

        let claims = validate_token(&token, &config).unwrap();
        assert_eq!(claims.sub, user);
        assert_eq!(claims.aud, "authenticated");
    }

    #[test]
    fn expired_token_fails() {
        // Well past the default 60 s leeway.
        let config = test_config();
        let token = sign_token(DbId::new_v4(), -300, &config).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn wrong_audience_fails() {
        let config = test_config();
        let other = JwtConfig {
            audience: "anon".to_string(),
            ..test_config()
        };
        let token = sign_token(DbId::new_v4(), 300, &other).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn different_secret_fails() {
        let config = test_config();
        let other = JwtConfig {
            secret: "secret-bravo".to_string(),
            ..test_config()
        };
        let token = sign_token(DbId::new_v4(), 300, &other).unwrap();
        assert!(validate_token(&token, &config).is_err());
    }
}
