use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::list_students;

pub fn init_students_router() -> Router<AppState> {
    Router::new().route("/students", get(list_students))
}
