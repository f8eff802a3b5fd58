use crate::error::QwResult;
use crate::scorer::SuspicionEngine;
use crate::store::SessionStore;
use crate::suspicion::{SessionSuspicionResult, SuspicionStatus};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub green: usize,
    pub amber: usize,
    pub red: usize,
}

impl TierCounts {
    pub fn record(&mut self, status: SuspicionStatus) {
        match status {
            SuspicionStatus::Green => self.green += 1,
            SuspicionStatus::Amber => self.amber += 1,
            SuspicionStatus::Red => self.red += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub session_id: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Sessions whose verdict was computed and written back.
    pub processed: usize,
    pub failures: Vec<BatchFailure>,
    pub tiers: TierCounts,
    pub policy_fingerprint: String,
}

/// Load, score, and overwrite the verdict of one session.
pub fn recompute_session<S: SessionStore + ?Sized>(
    store: &S,
    engine: &SuspicionEngine,
    id: &str,
) -> QwResult<SessionSuspicionResult> {
    let session = store.load_session(id)?;
    let result = engine.evaluate_session(&session)?;
    store.save_suspicion(id, &result)?;
    Ok(result)
}

/// Recomputes and overwrites the verdict of every completed session.
///
/// Sessions are independent and run in parallel. A session that fails to
/// load, validate, or save is logged and listed in the report; the rest of
/// the run carries on. Only failing to list sessions aborts.
pub fn recompute_all<S: SessionStore + ?Sized>(
    store: &S,
    engine: &SuspicionEngine,
) -> QwResult<BatchReport> {
    let start = Instant::now();
    let ids = store.completed_session_ids()?;
    info!("🔁 Recomputing suspicion for {} completed sessions", ids.len());

    let outcomes: Vec<(&String, QwResult<SessionSuspicionResult>)> = ids
        .par_iter()
        .map(|id| (id, recompute_session(store, engine, id)))
        .collect();

    let mut report = BatchReport {
        processed: 0,
        failures: Vec::new(),
        tiers: TierCounts::default(),
        policy_fingerprint: engine.fingerprint().to_string(),
    };

    for (id, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                report.processed += 1;
                report.tiers.record(result.status);
            }
            Err(e) => {
                warn!("⚠️  Session {} skipped: {}", id, e);
                report.failures.push(BatchFailure {
                    session_id: id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "✅ Recompute finished in {:.2?}: {} processed, {} failed (green {}, amber {}, red {})",
        start.elapsed(),
        report.processed,
        report.failures.len(),
        report.tiers.green,
        report.tiers.amber,
        report.tiers.red
    );
    Ok(report)
}
