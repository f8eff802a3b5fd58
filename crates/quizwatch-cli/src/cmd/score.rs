use crate::reports;
use clap::Args;
use quizwatch_core::config::SuspicionPolicy;
use quizwatch_core::session::SessionRecord;
use quizwatch_core::{QwResult, SuspicionEngine};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub policy: SuspicionPolicy,

    /// A single session record in JSON.
    pub file: PathBuf,

    /// Print the verdict exactly as it would be stored.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

pub fn run(args: ScoreArgs, engine: &SuspicionEngine) -> QwResult<()> {
    let content = fs::read_to_string(&args.file)?;
    let session: SessionRecord = serde_json::from_str(&content)?;
    let result = engine.evaluate_session(&session)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        reports::print_result(&session.id, &result);
    }
    Ok(())
}
