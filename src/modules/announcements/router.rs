use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_announcement, list_announcements, list_results};

/// Secretary routes, mounted at `/api/secretary`.
pub fn init_announcements_router() -> Router<AppState> {
    Router::new()
        .route(
            "/announcements",
            get(list_announcements).post(create_announcement),
        )
        .route("/results", get(list_results))
}
