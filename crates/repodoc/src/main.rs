//! repodoc — GitHub gateway with AI documentation generation.
//!
//! Main entry point for the repodoc server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use repodoc_config::Config;
use repodoc_llm::{GroqBackend, GroqConfig, SharedBackend};
use repodoc_server::{AppState, Server};
use repodoc_store::UserStore;

/// repodoc — GitHub gateway with AI documentation generation
#[derive(Parser)]
#[command(name = "repodoc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Directory for rotating log files
    #[arg(long, env = "REPODOC_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing — console (human-readable) + rotating JSON file
    let filter = if cli.verbose {
        "repodoc=debug,repodoc_server=debug,repodoc_auth=debug,repodoc_github=debug,\
         repodoc_llm=debug,repodoc_store=debug,repodoc_config=debug,info"
    } else {
        "repodoc=info,repodoc_server=info,repodoc_auth=info,repodoc_github=info,\
         repodoc_llm=info,repodoc_store=info,warn"
    };

    let log_dir = cli.log_dir.unwrap_or_else(|| {
        dirs::data_local_dir()
            .map(|d| d.join("repodoc").join("logs"))
            .unwrap_or_else(|| PathBuf::from("logs"))
    });
    let file_appender = tracing_appender::rolling::daily(&log_dir, "repodoc.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    use tracing_subscriber::prelude::*;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_filter(tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(tracing_subscriber::EnvFilter::new(
                    "repodoc=trace,repodoc_server=trace,repodoc_auth=trace,\
                     repodoc_github=trace,repodoc_llm=trace,repodoc_store=trace,info",
                )),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;

    // One startup line states which optional settings are present; secrets
    // themselves are never logged.
    info!(
        bind = %config.bind_address,
        client_url = %config.client_url,
        oauth_configured = config.oauth_configured(),
        model = config.groq_model.as_deref().unwrap_or("default"),
        database = %config.database_path.display(),
        listing_limit = config.docs_listing_limit,
        "Configuration loaded"
    );

    let store = Arc::new(
        UserStore::open(&config.database_path).context("opening user store")?,
    );

    let mut groq = GroqConfig::new(&config.groq_api_key);
    if let Some(ref model) = config.groq_model {
        groq = groq.with_model(model);
    }
    let llm: SharedBackend = Arc::new(GroqBackend::new(groq).context("creating completion backend")?);

    let state = AppState::new(config, store, llm).context("building application state")?;
    Server::new(state).run().await.context("running server")?;

    Ok(())
}
