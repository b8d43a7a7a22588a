use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use shule_auth::{Claims, verify_token};
use shule_core::{AppError, AuthContext};

use crate::state::AppState;

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AppError::unauthorized(anyhow!("Invalid authorization header")))?;

    value
        .strip_prefix("Bearer ")
        .map(Some)
        .ok_or_else(|| AppError::unauthorized(anyhow!("Invalid authorization header format")))
}

/// Validated token claims; rejects requests without a token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let claims = verify_token(token, &state.jwt_config)?;
        Ok(AuthUser(claims))
    }
}

/// The caller of any endpoint.
///
/// No `Authorization` header means an anonymous caller; a header carrying a
/// bad or expired token is rejected with 401 rather than downgraded.
#[derive(Debug, Clone)]
pub struct Caller(pub AuthContext);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if bearer_token(parts)?.is_none() {
            return Ok(Caller(AuthContext::anonymous()));
        }

        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        Ok(Caller(claims.auth_context()))
    }
}
