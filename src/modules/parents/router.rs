use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_parent_dashboard;

pub fn init_parent_router() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_parent_dashboard))
}
