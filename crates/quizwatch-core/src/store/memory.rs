use super::{validate_session_id, SessionStore};
use crate::error::{QwError, QwResult};
use crate::session::{AnswerEvent, SessionRecord, SessionStatus};
use crate::suspicion::SessionSuspicionResult;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct MemoryStore {
    sessions: RwLock<BTreeMap<String, SessionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces an open session. Any stored verdict is dropped
    /// with it. A completed session cannot be replaced.
    pub fn upsert(&self, record: SessionRecord) -> QwResult<()> {
        validate_session_id(&record.id)?;
        let mut guard = self.sessions.write();
        if guard.get(&record.id).is_some_and(|s| s.is_completed()) {
            return Err(QwError::Closed(record.id));
        }
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<SessionRecord> {
        self.sessions.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn append_answer(&self, id: &str, event: AnswerEvent) -> QwResult<usize> {
        let mut guard = self.sessions.write();
        let session = guard
            .get_mut(id)
            .ok_or_else(|| QwError::NotFound(id.to_string()))?;

        if session.is_completed() {
            return Err(QwError::Closed(id.to_string()));
        }
        session.answers.push(event);
        Ok(session.answers.len())
    }

    /// Returns `true` when this call moved the session to `completed`.
    pub fn mark_completed(&self, id: &str) -> QwResult<bool> {
        let mut guard = self.sessions.write();
        let session = guard
            .get_mut(id)
            .ok_or_else(|| QwError::NotFound(id.to_string()))?;

        if session.is_completed() {
            return Ok(false);
        }
        session.status = SessionStatus::Completed;
        Ok(true)
    }
}

impl SessionStore for MemoryStore {
    fn completed_session_ids(&self) -> QwResult<Vec<String>> {
        Ok(self
            .sessions
            .read()
            .values()
            .filter(|s| s.is_completed())
            .map(|s| s.id.clone())
            .collect())
    }

    fn load_session(&self, id: &str) -> QwResult<SessionRecord> {
        self.get(id).ok_or_else(|| QwError::NotFound(id.to_string()))
    }

    fn save_suspicion(&self, id: &str, result: &SessionSuspicionResult) -> QwResult<()> {
        let mut guard = self.sessions.write();
        let session = guard
            .get_mut(id)
            .ok_or_else(|| QwError::NotFound(id.to_string()))?;
        session.suspicion = Some(result.clone());
        Ok(())
    }
}
