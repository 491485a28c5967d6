use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a session token.
///
/// The token carries only the user's identifier: no expiration and no role or
/// permission claims. The signing secret is injected by the caller (it lives
/// in `Config`), never read from the environment here.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: i32,
}

/// Signs a session token (HS256) for the given user ID.
pub fn generate_token(user_id: i32, secret: &str) -> Result<String, AppError> {
    let claims = Claims { sub: user_id };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a session token's signature and decodes its claims.
///
/// Expiration checking is disabled because issued tokens carry no `exp`
/// claim. A malformed token or a signature from a different secret yields
/// `AppError::Unauthorized`.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
