//! Plant pairing CLI
//!
//! Command-line front-end for the scoring service: browse the ranked pairs,
//! run single or cross predictions and try the plant autocomplete.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pairing_client::external::ScoringClient;
use pairing_client::services::{PairCache, SearchCoordinator, SearchPhase, WorkflowController};
use pairing_client::storage::FileStore;
use pairing_client::Config;
use shared::{top_pair_line, validate_submission, ActiveTab, CoordinateResolver};

#[derive(Parser)]
#[command(name = "pairing-cli")]
#[command(about = "Plant pairing predictions from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the ranked top pairs.
    Top {
        /// Drop the cached list and fetch it again
        #[arg(long)]
        refresh: bool,
        /// Print the raw list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find the best partner for one plant.
    Single {
        plant: String,
    },

    /// Evaluate two parents as a pair.
    Cross {
        plant_a: String,
        plant_b: String,
    },

    /// Show a ranked pair as a full result.
    Show {
        /// 1-based rank in the list
        rank: usize,
    },

    /// Query the plant autocomplete.
    Search {
        query: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pairing_client=info,pairing_cli=info,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;
    tracing::debug!("Environment: {}", config.environment);

    let client = Arc::new(ScoringClient::new(&config.api)?);
    let store = Arc::new(FileStore::new(&config.cache.path));
    let cache = PairCache::with_key(store, config.cache.key.clone());
    let workflow = WorkflowController::new(client.clone(), cache, CoordinateResolver::builtin());

    match cli.command {
        Commands::Top { refresh, json } => {
            let source = if refresh {
                workflow.refresh().await?
            } else {
                workflow.initialize().await
            };
            tracing::info!("Top pairs source: {:?}", source);

            let pairs = workflow.snapshot().top_pairs;
            if json {
                print_json(&pairs)?;
            } else {
                for (index, entry) in pairs.iter().enumerate() {
                    println!("{}", top_pair_line(index + 1, entry));
                }
            }
        }
        Commands::Single { plant } => {
            validate_submission(ActiveTab::Single, &plant, "")?;
            workflow.set_active_tab(ActiveTab::Single);
            print_json(&workflow.calculate(&plant, None).await?)?;
        }
        Commands::Cross { plant_a, plant_b } => {
            validate_submission(ActiveTab::Cross, &plant_a, &plant_b)?;
            workflow.set_active_tab(ActiveTab::Cross);
            print_json(&workflow.calculate(&plant_a, Some(&plant_b)).await?)?;
        }
        Commands::Show { rank } => {
            workflow.initialize().await;
            print_json(&workflow.select_rank(rank)?)?;
        }
        Commands::Search { query } => {
            let search = SearchCoordinator::new(client, config.search.clone());
            search.input(query);
            let limit = config.search.debounce() + config.api.timeout();
            if tokio::time::timeout(limit, wait_for_settle(&search)).await.is_err() {
                tracing::warn!("Search did not settle within {:?}", limit);
            }
            print_json(&search.snapshot().suggestions)?;
        }
    }

    Ok(())
}

/// Poll until the field leaves the debounce and fetch phases
async fn wait_for_settle(search: &SearchCoordinator) {
    while matches!(
        search.snapshot().phase,
        SearchPhase::Debouncing | SearchPhase::Fetching
    ) {
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
