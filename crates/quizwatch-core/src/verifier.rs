use crate::error::QwResult;
use crate::scorer::SuspicionEngine;
use crate::session::SessionRecord;
use crate::store::SessionStore;
use crate::suspicion::{SessionSuspicionResult, SuspicionStatus};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditOutcome {
    Match,
    /// Completed, but no verdict has been written yet.
    Missing,
    Drift {
        stored: SuspicionStatus,
        recomputed: SuspicionStatus,
        score_delta: f64,
        summary_changed: bool,
    },
    /// The session could not be rescored at all.
    Failed { error: String },
}

impl AuditOutcome {
    pub fn is_drift(&self) -> bool {
        matches!(self, AuditOutcome::Drift { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub session_id: String,
    pub outcome: AuditOutcome,
    pub recomputed: Option<SessionSuspicionResult>,
}

/// Recomputes stored verdicts and reports where they no longer agree.
///
/// Verdicts can come from an older build or from a client-side fallback,
/// so a stored result is never trusted as-is. The verifier only reports;
/// it does not write.
pub struct Verifier {
    engine: Arc<SuspicionEngine>,
    tolerance: f64,
}

impl Verifier {
    pub fn new(engine: Arc<SuspicionEngine>) -> Self {
        Self {
            engine,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    pub fn compare(
        &self,
        stored: &SessionSuspicionResult,
        recomputed: &SessionSuspicionResult,
    ) -> AuditOutcome {
        let score_delta = recomputed.score - stored.score;
        let summary_changed = stored.summary != recomputed.summary;

        if score_delta.abs() > self.tolerance
            || stored.status != recomputed.status
            || summary_changed
        {
            AuditOutcome::Drift {
                stored: stored.status,
                recomputed: recomputed.status,
                score_delta,
                summary_changed,
            }
        } else {
            AuditOutcome::Match
        }
    }

    pub fn audit_session(&self, session: &SessionRecord) -> AuditEntry {
        let recomputed = match self.engine.evaluate_session(session) {
            Ok(r) => r,
            Err(e) => {
                return AuditEntry {
                    session_id: session.id.clone(),
                    outcome: AuditOutcome::Failed {
                        error: e.to_string(),
                    },
                    recomputed: None,
                }
            }
        };

        let outcome = match &session.suspicion {
            None => AuditOutcome::Missing,
            Some(stored) => self.compare(stored, &recomputed),
        };

        if let AuditOutcome::Drift {
            stored,
            recomputed: now,
            score_delta,
            ..
        } = &outcome
        {
            warn!(
                "Verdict drift on {}: stored {} vs recomputed {} (Δscore {:+.4})",
                session.id, stored, now, score_delta
            );
        }

        AuditEntry {
            session_id: session.id.clone(),
            outcome,
            recomputed: Some(recomputed),
        }
    }

    pub fn audit_store<S: SessionStore + ?Sized>(&self, store: &S) -> QwResult<Vec<AuditEntry>> {
        let ids = store.completed_session_ids()?;

        let entries: Vec<AuditEntry> = ids
            .par_iter()
            .map(|id| match store.load_session(id) {
                Ok(session) => self.audit_session(&session),
                Err(e) => AuditEntry {
                    session_id: id.clone(),
                    outcome: AuditOutcome::Failed {
                        error: e.to_string(),
                    },
                    recomputed: None,
                },
            })
            .collect();

        let drifted = entries.iter().filter(|e| e.outcome.is_drift()).count();
        info!(
            "Audit complete: {} sessions, {} drifted (policy {})",
            entries.len(),
            drifted,
            &self.engine.fingerprint()[..12]
        );
        Ok(entries)
    }
}
