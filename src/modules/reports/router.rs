use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::announcements::controller::create_headmaster_announcement;
use crate::state::AppState;

use super::controller::{get_headmaster_dashboard, get_secretary_report};

/// Mounted at `/api/secretary`.
pub fn init_reports_router() -> Router<AppState> {
    Router::new().route("/reports", get(get_secretary_report))
}

/// Mounted at `/api/headmaster`.
pub fn init_headmaster_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_headmaster_dashboard))
        .route("/announcements", post(create_headmaster_announcement))
}
