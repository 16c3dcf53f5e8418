use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AuthError;

/// Audience the hosted auth service puts on user access tokens.
pub const AUDIENCE: &str = "authenticated";

/// Claims read from a user access token.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessClaims {
    /// The auth user id, which is also the profile id.
    pub sub: Uuid,
    pub exp: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Validate an HS256 access token against the project's JWT secret.
pub fn validate_token(token: &str, secret: &str) -> Result<AccessClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[AUDIENCE]);
    validation.validate_exp = true;

    let data = decode::<AccessClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;
    check_role(data.claims)
}

/// Read the claims without checking the signature.
///
/// Clients rarely hold the JWT secret; the store verifies the token on every
/// request, so the client only needs the subject and expiry.
pub fn decode_unverified(token: &str) -> Result<AccessClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::RS256, Algorithm::ES256];
    validation.set_audience(&[AUDIENCE]);
    validation.validate_exp = true;
    validation.insecure_disable_signature_validation();

    let data = decode::<AccessClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    check_role(data.claims)
}

fn check_role(claims: AccessClaims) -> Result<AccessClaims, AuthError> {
    match claims.role.as_deref() {
        None | Some("authenticated") => Ok(claims),
        Some(other) => Err(AuthError::InvalidToken(format!("unexpected role: {other}"))),
    }
}
