use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quizwatch_core::QwError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] QwError),

    /// Body could not be read as the expected JSON.
    #[error(transparent)]
    Rejection(#[from] JsonRejection),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    Any(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::Engine(e) => match e {
                QwError::Validation(_) | QwError::Json(_) => (StatusCode::BAD_REQUEST, e.to_string()),
                QwError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
                QwError::Closed(_) => (StatusCode::CONFLICT, e.to_string()),
                QwError::Io(_) | QwError::Store(_) => {
                    tracing::error!("Store Error: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Store error".to_string(),
                    )
                }
            },
            AppError::Rejection(rejection) => (rejection.status(), rejection.body_text()),
            AppError::NotFound(what) => (StatusCode::NOT_FOUND, what),
            AppError::Any(e) => {
                tracing::error!("Internal Error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = self.status_and_message();
        (status, Json(json!({ "error": msg }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
