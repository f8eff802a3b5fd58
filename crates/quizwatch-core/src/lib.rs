// Re-export types from the protocol crate so they are accessible via quizwatch_core::*
pub use quizwatch_protocol::config;
pub use quizwatch_protocol::protocol;
pub use quizwatch_protocol::session;
pub use quizwatch_protocol::suspicion;

pub mod batch;
pub mod error;
pub mod hooks;
pub mod ordering;
pub mod policy;
pub mod scorer;
pub mod store;
pub mod verifier;

pub use error::{QwError, QwResult};
pub use scorer::{score_session, SuspicionEngine};
