//! Sports API server and CLI entry point.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sports_api::cli::{self, Cli, Commands};
use sports_api::config::AppConfig;
use sports_api::routes::{self, AppState};
use sports_api::storage::{sample_events, FixtureSeeder, SportsRepo, SqliteSportsRepo};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { endpoint, db } => run_server(endpoint, db).await,
        Commands::List { ids, db, format } => cli::run_list(ids, db, format),
    }
}

/// Run the API server.
async fn run_server(endpoint: Option<String>, db: Option<PathBuf>) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sports_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(e) = endpoint {
        config.server.endpoint = e;
    }
    if let Some(path) = db {
        config.database.path = path.to_string_lossy().to_string();
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Database path: {}", config.database.path);

    let seed = if config.seed.enabled {
        tracing::info!("Seeding {} sample events", config.seed.events);
        FixtureSeeder::new(sample_events(config.seed.events, Utc::now()))
    } else {
        tracing::info!("Seeding disabled");
        FixtureSeeder::default()
    };

    let repo = SqliteSportsRepo::open(&PathBuf::from(&config.database.path), seed)
        .with_context(|| format!("Failed to open database {}", config.database.path))?;
    repo.init().context("Failed to initialise sports repository")?;

    // Create application state
    let state = Arc::new(AppState {
        repo: Arc::new(repo),
    });

    let app = routes::router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.server.endpoint.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.endpoint))?;
    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
