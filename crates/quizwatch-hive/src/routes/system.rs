use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub sessions: usize,
    pub policy_fingerprint: String,
}

pub async fn root() -> &'static str {
    "QuizWatch Hive API v0.1"
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: state.store.len(),
        policy_fingerprint: state.engine.fingerprint().to_string(),
    })
}
