// src/main.rs

use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use bedside::config::{BedsideConfig, CONFIG};
use bedside::llm::{CompletionProvider, GroqClient};
use bedside::session::{SessionStore, spawn_ttl_sweeper};
use bedside::state::AppState;
use bedside::web;

#[derive(Parser)]
#[command(name = "bedside", version, about = "Virtual consultation chat server")]
struct Cli {
    /// Override BEDSIDE_HOST
    #[arg(long)]
    host: Option<String>,

    /// Override BEDSIDE_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: BedsideConfig = CONFIG.clone();
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    // Initialize tracing
    let level: Level = config.log_level.parse().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting bedside v{}", env!("CARGO_PKG_VERSION"));
    info!("Model: {} via {}", config.model, config.groq_base_url);

    if config.session_secret.is_empty() {
        warn!("BEDSIDE_SESSION_SECRET not set; using an ephemeral secret (sessions reset on restart)");
        config.session_secret = SessionStore::generate_id();
    }

    let provider: Arc<dyn CompletionProvider> = Arc::new(GroqClient::new(&config)?);
    let store = SessionStore::new();
    let session_ttl = Duration::from_secs(config.session_ttl);

    let state = AppState::new(Arc::new(config), store.clone(), provider);

    // Idle sessions are evicted in the background for the life of the process.
    let sweeper = spawn_ttl_sweeper(store, session_ttl);

    tokio::select! {
        result = web::run(state) => {
            if let Err(e) = result {
                error!("server error: {e:#}");
            }
        }
        _ = sweeper => {
            error!("session sweeper unexpectedly terminated");
        }
    }

    Ok(())
}
