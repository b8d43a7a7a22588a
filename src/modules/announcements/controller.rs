use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use tracing::instrument;

use shule_core::{AppError, PaginationParams};

use crate::middleware::auth::Caller;
use crate::modules::announcements::model::{
    Announcement, AnnouncementFilterParams, CreateAnnouncementDto, PaginatedAnnouncementsResponse,
};
use crate::modules::announcements::service::AnnouncementService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Post an announcement as the secretary
#[utoipa::path(
    post,
    path = "/api/secretary/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 201, description = "Announcement posted", body = Announcement),
        (status = 400, description = "Unknown target level"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff only"),
        (status = 422, description = "Missing title or content")
    ),
    tag = "Announcements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_announcement(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    ValidatedJson(dto): ValidatedJson<CreateAnnouncementDto>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    let announcement = AnnouncementService::create(&state.db, &ctx, dto).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// Post an announcement as the headmaster
#[utoipa::path(
    post,
    path = "/api/headmaster/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 201, description = "Announcement posted", body = Announcement),
        (status = 400, description = "Unknown target level"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff only"),
        (status = 422, description = "Missing title or content")
    ),
    tag = "Headmaster",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_headmaster_announcement(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    ValidatedJson(dto): ValidatedJson<CreateAnnouncementDto>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    let announcement = AnnouncementService::create(&state.db, &ctx, dto).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

/// List announcements, newest first
#[utoipa::path(
    get,
    path = "/api/secretary/announcements",
    params(AnnouncementFilterParams),
    responses(
        (status = 200, description = "Announcements", body = PaginatedAnnouncementsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only")
    ),
    tag = "Announcements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_announcements(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Query(filters): Query<AnnouncementFilterParams>,
) -> Result<Json<PaginatedAnnouncementsResponse>, AppError> {
    let announcements = AnnouncementService::list(&state.db, &ctx, filters).await?;
    Ok(Json(announcements))
}

/// List published results, newest first
#[utoipa::path(
    get,
    path = "/api/secretary/results",
    params(PaginationParams),
    responses(
        (status = 200, description = "Announcements of type results", body = PaginatedAnnouncementsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only")
    ),
    tag = "Announcements",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_results(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedAnnouncementsResponse>, AppError> {
    let results = AnnouncementService::results(&state.db, &ctx, pagination).await?;
    Ok(Json(results))
}
