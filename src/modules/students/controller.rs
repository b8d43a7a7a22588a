use axum::{
    Json,
    extract::{Query, State},
};
use tracing::instrument;

use shule_core::AppError;

use crate::middleware::auth::Caller;
use crate::modules::students::model::{PaginatedStudentsResponse, StudentFilterParams};
use crate::modules::students::service::StudentService;
use crate::state::AppState;

/// List registered students
#[utoipa::path(
    get,
    path = "/api/secretary/students",
    params(StudentFilterParams),
    responses(
        (status = 200, description = "Students ordered by registration number", body = PaginatedStudentsResponse),
        (status = 400, description = "Unknown level filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only")
    ),
    tag = "Secretary",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Query(filters): Query<StudentFilterParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let students = StudentService::list_students(&state.db, &ctx, filters).await?;
    Ok(Json(students))
}
