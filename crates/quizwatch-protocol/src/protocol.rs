use crate::session::{AnswerEvent, QuestionSnapshot, SessionStatus};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UpsertSessionRequest {
    #[serde(default)]
    pub questions: QuestionSnapshot,
    #[serde(default)]
    pub answers: Vec<AnswerEvent>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionAck {
    pub session_id: String,
    pub status: SessionStatus,
    pub answers: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionResponse {
    pub session_id: String,
    pub status: SessionStatus,
    /// False when the session had already been completed earlier.
    pub transitioned: bool,
}
