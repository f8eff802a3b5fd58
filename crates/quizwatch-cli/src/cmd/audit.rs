use crate::reports;
use clap::Args;
use quizwatch_core::config::SuspicionPolicy;
use quizwatch_core::store::JsonDirStore;
use quizwatch_core::verifier::{Verifier, DEFAULT_TOLERANCE};
use quizwatch_core::{QwResult, SuspicionEngine};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::warn;

/// Exit code when at least one stored verdict disagrees with a fresh run.
pub const DRIFT_EXIT_CODE: i32 = 2;

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    #[command(flatten)]
    pub policy: SuspicionPolicy,

    #[arg(short, long)]
    pub dir: PathBuf,

    /// Largest score difference still treated as agreement.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,
}

pub fn run(args: AuditArgs, engine: Arc<SuspicionEngine>) -> QwResult<()> {
    let store = JsonDirStore::open(&args.dir)?;
    let verifier = Verifier::new(engine).with_tolerance(args.tolerance);

    let mut entries = verifier.audit_store(&store)?;
    entries.sort_by(|a, b| a.session_id.cmp(&b.session_id));
    reports::print_audit_report(&entries);

    let drifted = entries.iter().filter(|e| e.outcome.is_drift()).count();
    if drifted > 0 {
        warn!("⚠️  {} stored verdicts drifted", drifted);
        process::exit(DRIFT_EXIT_CODE);
    }
    Ok(())
}
