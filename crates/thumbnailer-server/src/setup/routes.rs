//! Route configuration and setup

use crate::constants::{HEALTH_PATH, MAX_EVENT_BODY_BYTES, OBJECT_FINALIZED_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::object_finalized))
        .route(OBJECT_FINALIZED_PATH, post(handlers::object_finalized))
        .route(HEALTH_PATH, get(handlers::health))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_EVENT_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
