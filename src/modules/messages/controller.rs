use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use shule_core::{AppError, PaginationParams};

use crate::middleware::auth::Caller;
use crate::modules::messages::model::{PaginatedMessagesResponse, SendMessageDto, StudentMessage};
use crate::modules::messages::service::MessageService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Send a message to a student's parents
#[utoipa::path(
    post,
    path = "/api/secretary/messages",
    request_body = SendMessageDto,
    responses(
        (status = 201, description = "Message sent", body = StudentMessage),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff only"),
        (status = 404, description = "No student with that registration number"),
        (status = 422, description = "Missing field")
    ),
    tag = "Messages",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn send_message(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    ValidatedJson(dto): ValidatedJson<SendMessageDto>,
) -> Result<(StatusCode, Json<StudentMessage>), AppError> {
    let message = MessageService::send(&state.db, &ctx, dto).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// List sent messages, newest first
#[utoipa::path(
    get,
    path = "/api/secretary/messages",
    params(PaginationParams),
    responses(
        (status = 200, description = "Messages", body = PaginatedMessagesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only")
    ),
    tag = "Messages",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedMessagesResponse>, AppError> {
    let messages = MessageService::list(&state.db, &ctx, pagination).await?;
    Ok(Json(messages))
}
