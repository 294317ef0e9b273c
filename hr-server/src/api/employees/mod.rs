//! Employee API
//!
//! The collection lives at `/employees`, single records at `/employee/{id}`.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(handler::list).post(handler::create))
        .route("/employees/count", get(handler::count))
        .route(
            "/employee/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/employee/{id}/status", patch(handler::toggle_status))
}
