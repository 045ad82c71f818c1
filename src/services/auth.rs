use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Member, MemberId};
use crate::services::store::{IdentityStore, StoreError};

/// Errors raised while authenticating a caller
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing or malformed JWT")]
    MissingToken,

    #[error("Invalid or expired JWT: {0}")]
    InvalidToken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Failed to issue token: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),

    #[error("Credential lookup failed: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: String,
    exp: i64,
}

/// Issues and validates HS256 bearer tokens
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, member_id: MemberId) -> Result<String, AuthError> {
        let claims = Claims {
            user_id: member_id.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(AuthError::Issue)
    }

    /// Member id carried by a valid, unexpired token
    pub fn verify(&self, token: &str) -> Result<MemberId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        data.claims
            .user_id
            .parse()
            .map_err(|_| AuthError::InvalidToken(format!("bad user_id claim {:?}", data.claims.user_id)))
    }
}

/// Look up a member by email and compare the credential verbatim
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn verify_credentials(
    store: &dyn IdentityStore,
    email: &str,
    password: &str,
) -> Result<Member, AuthError> {
    let member = store
        .get_member_by_email(email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !member.password.matches(password) {
        tracing::warn!(member_id = %member.id, "Invalid password attempt");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(member)
}
