pub mod json_dir;
pub mod memory;

pub use self::json_dir::JsonDirStore;
pub use self::memory::MemoryStore;

use crate::error::{QwError, QwResult};
use crate::session::SessionRecord;
use crate::suspicion::SessionSuspicionResult;

const MAX_SESSION_ID_LEN: usize = 128;

/// Boundary between the engine and whatever persists sessions.
///
/// `save_suspicion` overwrites; implementations serialize writes per session
/// id so a recompute never interleaves with another write of the same
/// session.
pub trait SessionStore: Send + Sync {
    fn completed_session_ids(&self) -> QwResult<Vec<String>>;

    fn load_session(&self, id: &str) -> QwResult<SessionRecord>;

    fn save_suspicion(&self, id: &str, result: &SessionSuspicionResult) -> QwResult<()>;
}

pub fn validate_session_id(id: &str) -> QwResult<()> {
    if id.is_empty() || id.len() > MAX_SESSION_ID_LEN {
        return Err(QwError::Validation(format!(
            "session id must be 1..={} characters",
            MAX_SESSION_ID_LEN
        )));
    }
    if !id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(QwError::Validation(format!(
            "session id '{}' contains characters outside [A-Za-z0-9_-]",
            id
        )));
    }
    Ok(())
}
