pub mod config;
pub mod protocol;
pub mod session;
pub mod suspicion;

pub use config::SuspicionPolicy;
pub use session::{AnswerEvent, QuestionSnapshot, QuestionText, SessionRecord, SessionStatus};
pub use suspicion::{SessionSuspicionResult, SuspicionStatus, SuspicionSummary};
