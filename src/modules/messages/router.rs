use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{list_messages, send_message};

pub fn init_messages_router() -> Router<AppState> {
    Router::new().route("/messages", get(list_messages).post(send_message))
}
