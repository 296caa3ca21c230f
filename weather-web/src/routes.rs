//! Route definitions

use axum::{Router, routing::get};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{error::handle_panic, handlers, state::AppState};

/// Create the router with the search page, fallbacks and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::search))
        .fallback(handlers::not_found)
        .with_state(state)
        // first added = innermost
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}
