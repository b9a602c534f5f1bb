//! Admin console routes built from the registered site. Mount under /admin.
//! Handlers resolve the model by path segment; unregistered paths 404.

use crate::handlers::admin::{change_list, detail, index};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/:model", get(change_list))
        .route("/:model/:id", get(detail))
        .with_state(state)
}
