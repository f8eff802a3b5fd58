use thiserror::Error;

#[derive(Error, Debug)]
pub enum QwError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session closed: {0}")]
    Closed(String),

    #[error("Store Error: {0}")]
    Store(String),
}

pub type QwResult<T> = Result<T, QwError>;
