use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use quizwatch_core::config::SuspicionPolicy;
use quizwatch_core::policy::load_policy;
use quizwatch_core::{QwResult, SuspicionEngine};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON policy file. Flags given on the command line win over it.
    #[arg(global = true, long)]
    policy: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Score(cmd::score::ScoreArgs),
    Recompute(cmd::recompute::RecomputeArgs),
    Audit(cmd::audit::AuditArgs),
    Generate(cmd::generate::GenerateArgs),
}

fn resolve_policy(
    path: Option<&str>,
    cli_policy: &SuspicionPolicy,
    sub_matches: &ArgMatches,
) -> QwResult<SuspicionPolicy> {
    match path {
        Some(path) => {
            info!("⚖️  Loading policy from: {}", path);
            let mut file_policy = load_policy(path)?;
            file_policy.merge_from_cli(cli_policy, sub_matches);
            Ok(file_policy)
        }
        None => Ok(cli_policy.clone()),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // stdout is reserved for reports and --json output.
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let (cli_policy, name) = match &cli.command {
        Commands::Score(args) => (&args.policy, "score"),
        Commands::Recompute(args) => (&args.policy, "recompute"),
        Commands::Audit(args) => (&args.policy, "audit"),
        Commands::Generate(args) => {
            if let Err(e) = cmd::generate::run(args) {
                error!("❌ {}", e);
                process::exit(1);
            }
            return;
        }
    };

    let sub_matches = match matches.subcommand_matches(name) {
        Some(m) => m,
        None => {
            error!("❌ Missing arguments for '{}'", name);
            process::exit(1);
        }
    };

    let engine = resolve_policy(cli.policy.as_deref(), cli_policy, sub_matches)
        .and_then(SuspicionEngine::new)
        .unwrap_or_else(|e| {
            error!("\n❌ FATAL ERROR INITIALIZING ENGINE:");
            error!("   {}", e);
            process::exit(1);
        });
    let engine = Arc::new(engine);
    info!("🚀 Suspicion engine ready (policy {})", &engine.fingerprint()[..12]);

    let outcome = match cli.command {
        Commands::Score(args) => cmd::score::run(args, &engine),
        Commands::Recompute(args) => cmd::recompute::run(args, &engine),
        Commands::Audit(args) => cmd::audit::run(args, engine),
        Commands::Generate(_) => Ok(()),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
