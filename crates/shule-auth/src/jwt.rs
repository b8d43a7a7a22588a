use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use shule_config::JwtConfig;
use shule_core::{AppError, Role};

use crate::claims::Claims;

/// Issues a signed access token for `subject` acting as `role`.
///
/// Anonymous callers never hold a token, so asking for one is an internal
/// error rather than a silent downgrade.
pub fn create_access_token(
    subject: &str,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    if role == Role::Anonymous {
        return Err(AppError::internal(anyhow!(
            "Cannot issue a token for an anonymous caller"
        )));
    }

    let now = Utc::now().timestamp().max(0) as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: subject.to_string(),
        role,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Checks signature and expiry and returns the embedded claims.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Invalid or expired token")))
}
