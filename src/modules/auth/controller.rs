use axum::{Json, extract::State};
use tracing::instrument;
use utoipa::ToSchema;

use shule_core::AppError;

use crate::modules::auth::model::{
    LoginRequest, LoginResponse, ParentLoginRequest, ParentLoginResponse,
};
use crate::modules::auth::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Staff login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Missing username or password", body = ErrorResponse),
        (status = 429, description = "Too many login attempts", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_staff(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_staff(&state.db, &state.jwt_config, dto).await?;
    Ok(Json(response))
}

/// Parent login with a registration number
#[utoipa::path(
    post,
    path = "/api/auth/parent/login",
    request_body = ParentLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ParentLoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Missing registration number or password", body = ErrorResponse),
        (status = 429, description = "Too many login attempts", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_parent(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ParentLoginRequest>,
) -> Result<Json<ParentLoginResponse>, AppError> {
    let response = AuthService::login_parent(&state.db, &state.jwt_config, dto).await?;
    Ok(Json(response))
}
