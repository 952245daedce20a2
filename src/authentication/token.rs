use anyhow::Context;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

/// The user a request acts on behalf of, taken from its bearer token.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins may modify anything, members only what they own.
    pub fn can_modify(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id == owner_id
    }
}

#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

#[derive(Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: Role,
    iat: i64,
    exp: i64,
    iss: String,
}

/// HS256 keys shared with the identity service that signs user tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl: TimeDelta,
}

impl JwtKeys {
    pub fn new(secret: &Secret<String>, issuer: String, ttl_hours: i64) -> Self {
        let secret = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            issuer,
            ttl: TimeDelta::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String, anyhow::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            iss: self.issuer.clone(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .context("Failed to sign access token")
    }

    pub fn verify(&self, token: &str) -> Result<Actor, TokenError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e),
            },
        )?;

        Ok(Actor {
            user_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}
