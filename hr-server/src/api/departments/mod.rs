//! Department API

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(handler::list).post(handler::create))
        .route(
            "/departments/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/departments/{id}/status", patch(handler::toggle_status))
}
