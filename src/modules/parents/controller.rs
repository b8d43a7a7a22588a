use axum::{Json, extract::State};
use tracing::instrument;

use shule_core::AppError;

use crate::middleware::auth::Caller;
use crate::modules::parents::model::ParentDashboard;
use crate::modules::parents::service::ParentService;
use crate::state::AppState;

/// The logged-in parent's student, announcements and messages
#[utoipa::path(
    get,
    path = "/api/parent/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = ParentDashboard),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Parents only"),
        (status = 404, description = "Student no longer exists")
    ),
    tag = "Parent",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_parent_dashboard(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> Result<Json<ParentDashboard>, AppError> {
    let dashboard = ParentService::dashboard(&state.db, &ctx).await?;
    Ok(Json(dashboard))
}
