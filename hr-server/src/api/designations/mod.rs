//! Designation API

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/designations", get(handler::list).post(handler::create))
        .route(
            "/designations/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/designations/{id}/status", patch(handler::toggle_status))
}
