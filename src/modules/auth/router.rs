use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login_parent, login_staff};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_staff))
        .route("/parent/login", post(login_parent))
}
