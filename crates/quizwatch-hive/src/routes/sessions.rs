use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use quizwatch_core::hooks::score_on_completion;
use quizwatch_core::protocol::{CompleteSessionResponse, SessionAck, UpsertSessionRequest};
use quizwatch_core::scorer::validate_events;
use quizwatch_core::session::{AnswerEvent, SessionRecord, SessionStatus};
use quizwatch_core::suspicion::SessionSuspicionResult;
use std::sync::Arc;
use tracing::{debug, info};

pub async fn upsert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpsertSessionRequest>, JsonRejection>,
) -> AppResult<Json<SessionAck>> {
    let Json(payload) = payload?;
    validate_events(&payload.answers)?;

    let mut record = SessionRecord::new(id.clone(), payload.questions);
    record.answers = payload.answers;
    let answers = record.answers.len();
    state.store.upsert(record)?;

    debug!("Session {} stored with {} answers", id, answers);
    Ok(Json(SessionAck {
        session_id: id,
        status: SessionStatus::InProgress,
        answers,
    }))
}

pub async fn append_answer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    event: Result<Json<AnswerEvent>, JsonRejection>,
) -> AppResult<Json<SessionAck>> {
    let Json(event) = event?;
    validate_events(std::slice::from_ref(&event))?;
    let answers = state.store.append_answer(&id, event)?;

    Ok(Json(SessionAck {
        session_id: id,
        status: SessionStatus::InProgress,
        answers,
    }))
}

/// Closes the session and answers straight away. Scoring runs afterwards on
/// the blocking pool; its outcome never changes this response.
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<CompleteSessionResponse>> {
    let transitioned = state.store.mark_completed(&id)?;

    if transitioned {
        info!("🏁 Session {} completed", id);
        let store = state.store.clone();
        let engine = state.engine.clone();
        let session_id = id.clone();
        tokio::task::spawn_blocking(move || {
            score_on_completion(store.as_ref(), &engine, &session_id);
        });
    }

    Ok(Json(CompleteSessionResponse {
        session_id: id,
        status: SessionStatus::Completed,
        transitioned,
    }))
}

pub async fn get_suspicion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Json<SessionSuspicionResult>> {
    let session = state
        .store
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("session '{}'", id)))?;

    session
        .suspicion
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no verdict for session '{}' yet", id)))
}
