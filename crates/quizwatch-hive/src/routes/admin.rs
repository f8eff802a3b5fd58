use crate::error::AppResult;
use crate::state::AppState;
use axum::{extract::State, Json};
use quizwatch_core::batch::{recompute_all, BatchReport};
use std::sync::Arc;
use tracing::info;

/// Recomputes every completed session with the hive's engine.
pub async fn recompute(State(state): State<Arc<AppState>>) -> AppResult<Json<BatchReport>> {
    info!("🔁 Admin recompute requested");
    let store = state.store.clone();
    let engine = state.engine.clone();

    let report = tokio::task::spawn_blocking(move || recompute_all(store.as_ref(), &engine))
        .await
        .map_err(anyhow::Error::from)??;

    Ok(Json(report))
}
