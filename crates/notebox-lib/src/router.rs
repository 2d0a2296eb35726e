// crates/notebox-lib/src/router.rs

//! Top-level HTTP router assembly.
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth, notes, users, AppState};

/// Compose the full application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(auth::routes::router(state.clone()))
        .merge(notes::router(state.clone()))
        .merge(users::router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
