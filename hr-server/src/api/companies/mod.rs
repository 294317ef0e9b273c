//! Company API (admin only)

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/companies", get(handler::list).post(handler::create))
        .route(
            "/companies/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/companies/{id}/status", patch(handler::toggle_status))
}
