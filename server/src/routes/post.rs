use axum::{routing::get, Router};

use crate::handlers::post_handlers::{get_post, healthz, root};
use crate::state::AppState;

pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/post", get(get_post))
        .with_state(state)
}
