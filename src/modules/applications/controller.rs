use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Local};
use tracing::instrument;

use shule_core::{Action, AppError};

use crate::middleware::auth::Caller;
use crate::modules::applications::model::{
    Application, ApplicationFilterParams, CompletePaymentDto, EducationLevel,
    PaginatedApplicationsResponse, PaymentInstructions, RejectApplicationDto, Student,
    SubmitApplicationDto,
};
use crate::modules::applications::service::ApplicationService;
use crate::state::AppState;
use crate::validator::{OptionalValidatedJson, ValidatedJson};

/// Submit an enrollment application
#[utoipa::path(
    post,
    path = "/api/applications/{level}",
    params(
        ("level" = String, Path, description = "kg/nursery, primary, olevel/o-level or alevel/a-level")
    ),
    request_body = SubmitApplicationDto,
    responses(
        (status = 201, description = "Application submitted", body = Application),
        (status = 400, description = "Unknown education level"),
        (status = 403, description = "Staff cannot submit applications"),
        (status = 422, description = "Missing, blank or oversized field"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Applications"
)]
#[instrument(skip(state, payload))]
pub async fn submit_application(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(level): Path<String>,
    payload: Result<ValidatedJson<SubmitApplicationDto>, AppError>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    // The level and the caller are checked before the body is reported on.
    let level = level.parse::<EducationLevel>()?;
    ctx.authorize(Action::SubmitApplication)?;
    let ValidatedJson(dto) = payload?;

    let application = ApplicationService::submit(&state.db, &ctx, level, dto).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Fee and payment channels for an application
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Payment instructions", body = PaymentInstructions),
        (status = 404, description = "Application not found")
    ),
    tag = "Applications"
)]
#[instrument(skip(state))]
pub async fn get_payment_instructions(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<PaymentInstructions>, AppError> {
    let instructions = ApplicationService::payment_instructions(
        &state.db,
        &ctx,
        id,
        &state.admission_config.payment_channels,
    )
    .await?;
    Ok(Json(instructions))
}

/// Confirm that the application fee has been paid
#[utoipa::path(
    post,
    path = "/api/payments/{id}/complete",
    params(("id" = i64, Path, description = "Application ID")),
    request_body(content = CompletePaymentDto, description = "Optional payment proof"),
    responses(
        (status = 200, description = "Application marked completed", body = Application),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application already approved or rejected")
    ),
    tag = "Applications"
)]
#[instrument(skip(state))]
pub async fn complete_payment(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    OptionalValidatedJson(dto): OptionalValidatedJson<CompletePaymentDto>,
) -> Result<Json<Application>, AppError> {
    let application = ApplicationService::mark_payment_completed(&state.db, &ctx, id, dto).await?;
    Ok(Json(application))
}

/// List applications for review
#[utoipa::path(
    get,
    path = "/api/secretary/applications",
    params(ApplicationFilterParams),
    responses(
        (status = 200, description = "Applications, newest first", body = PaginatedApplicationsResponse),
        (status = 400, description = "Unknown level or status filter"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only")
    ),
    tag = "Secretary",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Query(filters): Query<ApplicationFilterParams>,
) -> Result<Json<PaginatedApplicationsResponse>, AppError> {
    let applications = ApplicationService::list_applications(&state.db, &ctx, filters).await?;
    Ok(Json(applications))
}

/// Review a single application
#[utoipa::path(
    get,
    path = "/api/secretary/applications/{id}",
    params(("id" = i64, Path, description = "Application ID")),
    responses(
        (status = 200, description = "Application", body = Application),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only"),
        (status = 404, description = "Application not found")
    ),
    tag = "Secretary",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_application(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<Json<Application>, AppError> {
    let application = ApplicationService::get_application(&state.db, &ctx, id).await?;
    Ok(Json(application))
}

/// Approve an application and register the student
#[utoipa::path(
    post,
    path = "/api/secretary/applications/{id}/approve",
    params(("id" = i64, Path, description = "Application ID")),
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application already approved or rejected")
    ),
    tag = "Secretary",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn approve_application(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let as_of_year = Local::now().year();
    let student = ApplicationService::approve(
        &state.db,
        &ctx,
        id,
        as_of_year,
        &state.parent_password_hash,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Reject an application
#[utoipa::path(
    post,
    path = "/api/secretary/applications/{id}/reject",
    params(("id" = i64, Path, description = "Application ID")),
    request_body(content = RejectApplicationDto, description = "Optional reason"),
    responses(
        (status = 200, description = "Application rejected", body = Application),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Secretary only"),
        (status = 404, description = "Application not found"),
        (status = 409, description = "Application already approved or rejected")
    ),
    tag = "Secretary",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reject_application(
    State(state): State<AppState>,
    Caller(ctx): Caller,
    Path(id): Path<i64>,
    OptionalValidatedJson(dto): OptionalValidatedJson<RejectApplicationDto>,
) -> Result<Json<Application>, AppError> {
    let application = ApplicationService::reject(&state.db, &ctx, id, dto.reason).await?;
    Ok(Json(application))
}
