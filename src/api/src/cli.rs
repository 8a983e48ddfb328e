//! CLI commands for sports-api.
//!
//! Supports API server mode and an offline listing of a database file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::storage::{FixtureSeeder, SportsRepo, SqliteSportsRepo};
use crate::types::{Event, ListEventsRequestFilter, ListEventsResponse};

#[derive(Parser)]
#[command(name = "sports-api")]
#[command(version, about = "Sports events API and CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Address to listen on [default: localhost:7000]
        #[arg(short, long)]
        endpoint: Option<String>,

        /// SQLite database file [default: ./db/sports.db]
        #[arg(short, long)]
        db: Option<PathBuf>,
    },

    /// List events stored in a database file
    List {
        /// Only these event ids
        #[arg(short, long, value_delimiter = ',')]
        ids: Vec<i64>,

        /// SQLite database file [default: ./db/sports.db]
        #[arg(short, long)]
        db: Option<PathBuf>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

/// List events from an existing database without seeding it.
pub fn run_list(ids: Vec<i64>, db: Option<PathBuf>, format: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let path = db.unwrap_or_else(|| PathBuf::from(&config.database.path));

    if !path.exists() {
        anyhow::bail!("Database not found: {}", path.display());
    }

    let repo = SqliteSportsRepo::open(&path, FixtureSeeder::default())
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let filter = ListEventsRequestFilter::by_ids(ids);
    let events = repo.list(Some(&filter)).context("Failed to list events")?;
    repo.close();

    eprintln!("Events: {}", events.len());

    let response = ListEventsResponse { events };

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "table" => {
            print_table(&response.events);
        }
        _ => {
            eprintln!("Unknown format: {}. Using JSON.", format);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Print events in table format, soonest first.
fn print_table(events: &[Event]) {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| (e.advertised_start_time, e.id));

    println!("{:>6}  {:<30}  {}", "ID", "NAME", "ADVERTISED START");
    for event in sorted {
        println!(
            "{:>6}  {:<30}  {}",
            event.id,
            event.name,
            event.advertised_start_time.to_datetime().to_rfc3339()
        );
    }
}
