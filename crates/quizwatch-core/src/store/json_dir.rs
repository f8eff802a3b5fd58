use super::{validate_session_id, SessionStore};
use crate::error::{QwError, QwResult};
use crate::session::SessionRecord;
use crate::suspicion::SessionSuspicionResult;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// A directory with one `<session id>.json` file per session.
///
/// Writes to one session id are serialized through a per-id lock, and each
/// write goes through its own temp file in the same directory.
pub struct JsonDirStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl JsonDirStore {
    pub fn open<P: AsRef<Path>>(root: P) -> QwResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(QwError::Store(format!(
                "session directory {:?} does not exist",
                root
            )));
        }
        Ok(Self {
            root,
            locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn create<P: AsRef<Path>>(root: P) -> QwResult<Self> {
        fs::create_dir_all(root.as_ref())?;
        Self::open(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> QwResult<PathBuf> {
        validate_session_id(id)?;
        Ok(self.root.join(format!("{}.json", id)))
    }

    fn read_record(&self, path: &Path) -> QwResult<SessionRecord> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn lock_for(&self, id: &str) -> Arc<Mutex<()>> {
        self.locks
            .lock()
            .entry(id.to_string())
            .or_default()
            .clone()
    }

    /// Writes through a private temp file so readers never see half a record.
    pub fn write_record(&self, record: &SessionRecord) -> QwResult<()> {
        let lock = self.lock_for(&record.id);
        let _guard = lock.lock();
        self.persist(record)
    }

    // Caller holds the session's lock.
    fn persist(&self, record: &SessionRecord) -> QwResult<()> {
        let path = self.path_for(&record.id)?;
        let json = serde_json::to_vec_pretty(record)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".write-")
            .rand_bytes(6)
            .tempfile_in(&self.root)?;
        tmp.write_all(&json)?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Every session id in the directory, sorted.
    pub fn session_ids(&self) -> QwResult<Vec<String>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }
}

impl SessionStore for JsonDirStore {
    fn completed_session_ids(&self) -> QwResult<Vec<String>> {
        let mut completed = Vec::new();
        for id in self.session_ids()? {
            let path = match self.path_for(&id) {
                Ok(p) => p,
                Err(e) => {
                    warn!("Skipping {}: {}", id, e);
                    continue;
                }
            };
            match self.read_record(&path) {
                Ok(record) if record.is_completed() => completed.push(id),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable session file {:?}: {}", path, e),
            }
        }
        Ok(completed)
    }

    fn load_session(&self, id: &str) -> QwResult<SessionRecord> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(QwError::NotFound(id.to_string()));
        }
        let record = self.read_record(&path)?;
        if record.id != id {
            return Err(QwError::Store(format!(
                "file {:?} holds session '{}'",
                path, record.id
            )));
        }
        Ok(record)
    }

    fn save_suspicion(&self, id: &str, result: &SessionSuspicionResult) -> QwResult<()> {
        validate_session_id(id)?;
        let lock = self.lock_for(id);
        let _guard = lock.lock();

        let mut record = self.load_session(id)?;
        record.suspicion = Some(result.clone());
        self.persist(&record)
    }
}
