use quizwatch_core::store::MemoryStore;
use quizwatch_core::SuspicionEngine;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub engine: Arc<SuspicionEngine>,
}

impl AppState {
    pub fn new(engine: SuspicionEngine) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            engine: Arc::new(engine),
        }
    }
}
