use crate::batch::recompute_session;
use crate::scorer::SuspicionEngine;
use crate::store::SessionStore;
use crate::suspicion::SessionSuspicionResult;
use tracing::{debug, error};

/// Completion hook. Best effort: a failure is logged and left for the next
/// batch recompute, it never reaches whoever completed the session.
pub fn score_on_completion<S: SessionStore + ?Sized>(
    store: &S,
    engine: &SuspicionEngine,
    id: &str,
) -> Option<SessionSuspicionResult> {
    match recompute_session(store, engine, id) {
        Ok(result) => {
            debug!("Scored completed session {}: {}", id, result.status);
            Some(result)
        }
        Err(e) => {
            error!("❌ Suspicion scoring failed for session {}: {}", id, e);
            None
        }
    }
}
