/**
 * Session Tokens
 *
 * JWT creation and verification for user sessions. Tokens are HS256,
 * carry the user id as `sub`, and expire after 12 hours. The signing
 * secret is passed in by the caller (it lives in `Config`), never read
 * from the environment here.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Session lifetime: 12 hours.
pub const SESSION_TTL_SECS: u64 = 12 * 60 * 60;

/// JWT claims for a session.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a session token for a user.
pub fn create_token(
    user_id: Uuid,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + SESSION_TTL_SECS,
        iat: now,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key)
}

/// Verify a session token and return its claims. Fails on bad signature,
/// malformed token, or expiry.
pub fn verify_token(
    token: &str,
    secret: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip_preserves_subject() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, SECRET).unwrap();

        let claims = verify_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp, claims.iat + SESSION_TTL_SECS);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(verify_token("invalid.token.here", SECRET).is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = create_token(Uuid::new_v4(), SECRET).unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }
}
