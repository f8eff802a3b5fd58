use anyhow::Context;
use clap::Parser;
use quizwatch_core::config::SuspicionPolicy;
use quizwatch_core::policy::load_policy;
use quizwatch_core::SuspicionEngine;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod error;
mod routes;
mod state;

use crate::state::AppState;

#[derive(Parser)]
struct Args {
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// JSON policy file; the canonical policy is used when absent.
    #[arg(long)]
    policy: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("🐝 QuizWatch Hive is initializing...");

    let policy = match &args.policy {
        Some(path) => load_policy(path).context("loading suspicion policy")?,
        None => {
            warn!("⚠️  No policy file given. Using the canonical policy.");
            SuspicionPolicy::default()
        }
    };
    let engine = SuspicionEngine::new(policy)?;
    info!("⚖️  Policy fingerprint {}", &engine.fingerprint()[..12]);

    let state = Arc::new(AppState::new(engine));

    let app = routes::system_routes()
        .merge(routes::session_routes())
        .merge(routes::admin_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("🚀 Hive listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
