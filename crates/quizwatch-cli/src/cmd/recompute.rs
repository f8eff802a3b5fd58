use crate::reports;
use clap::Args;
use quizwatch_core::batch::recompute_all;
use quizwatch_core::config::SuspicionPolicy;
use quizwatch_core::store::JsonDirStore;
use quizwatch_core::{QwResult, SuspicionEngine};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RecomputeArgs {
    #[command(flatten)]
    pub policy: SuspicionPolicy,

    /// Directory of `<session id>.json` files.
    #[arg(short, long)]
    pub dir: PathBuf,
}

pub fn run(args: RecomputeArgs, engine: &SuspicionEngine) -> QwResult<()> {
    let store = JsonDirStore::open(&args.dir)?;
    let report = recompute_all(&store, engine)?;
    reports::print_batch_report(&report);
    Ok(())
}
