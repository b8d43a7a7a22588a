use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    approve_application, complete_payment, get_application, get_payment_instructions,
    list_applications, reject_application, submit_application,
};

/// Public submission route, mounted at `/api/applications`.
pub fn init_applications_router() -> Router<AppState> {
    Router::new().route("/{level}", post(submit_application))
}

/// Public payment routes, mounted at `/api/payments`.
pub fn init_payments_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_payment_instructions))
        .route("/{id}/complete", post(complete_payment))
}

/// Secretary review routes, mounted at `/api/secretary`.
pub fn init_application_review_router() -> Router<AppState> {
    Router::new()
        .route("/applications", get(list_applications))
        .route("/applications/{id}", get(get_application))
        .route("/applications/{id}/approve", post(approve_application))
        .route("/applications/{id}/reject", post(reject_application))
}
