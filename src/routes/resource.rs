//! Resource CRUD routes. Static segments (`/count`, `/search`) take priority over `/:id`.

use crate::handlers::resource::{count, create, delete as delete_handler, list, read, search, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn resource_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/count", get(count))
        .route("/search", get(search))
        .route("/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
