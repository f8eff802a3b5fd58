pub mod admin;
pub mod sessions;
pub mod system;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;

pub fn system_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", axum::routing::get(system::root))
        .route("/health", axum::routing::get(system::health))
}

pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions/{id}", axum::routing::put(sessions::upsert))
        .route("/sessions/{id}/answers", axum::routing::post(sessions::append_answer))
        .route("/sessions/{id}/complete", axum::routing::post(sessions::complete))
        .route("/sessions/{id}/suspicion", axum::routing::get(sessions::get_suspicion))
}

pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/admin/recompute", axum::routing::post(admin::recompute))
}
