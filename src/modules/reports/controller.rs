use axum::{Json, extract::State};
use tracing::instrument;

use shule_core::AppError;

use crate::middleware::auth::Caller;
use crate::modules::reports::model::{HeadmasterDashboard, SecretaryReport};
use crate::modules::reports::service::ReportService;
use crate::state::AppState;

/// Student and application counts by status
#[utoipa::path(
    get,
    path = "/api/secretary/reports",
    responses(
        (status = 200, description = "Report", body = SecretaryReport),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only")
    ),
    tag = "Secretary",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_secretary_report(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> Result<Json<SecretaryReport>, AppError> {
    let report = ReportService::secretary_report(&state.db, &ctx).await?;
    Ok(Json(report))
}

/// Headmaster summary
#[utoipa::path(
    get,
    path = "/api/headmaster/dashboard",
    responses(
        (status = 200, description = "Dashboard totals", body = HeadmasterDashboard),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Headmaster only")
    ),
    tag = "Headmaster",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_headmaster_dashboard(
    State(state): State<AppState>,
    Caller(ctx): Caller,
) -> Result<Json<HeadmasterDashboard>, AppError> {
    let dashboard = ReportService::headmaster_dashboard(&state.db, &ctx).await?;
    Ok(Json(dashboard))
}
