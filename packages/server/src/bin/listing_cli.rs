//! Command-line access to the listing pipeline
//!
//! Runs the same activities as the HTTP API against the configured database
//! and prints the same JSON envelope the API returns.

use anyhow::Result;
use clap::{Parser, Subcommand};
use listing_core::common::pagination::DEFAULT_LIMIT;
use listing_core::common::{ListingError, Pagination};
use listing_core::domains::products::{
    get_asin_history, get_optimization, list_optimizations, process_product,
};
use listing_core::kernel::{connect_database, ServerDeps};
use listing_core::server::{ApiErrorBody, ApiResponse};
use listing_core::Config;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "listing_cli")]
#[command(about = "Optimize product listings and inspect stored optimizations")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, optimize and store a listing
    Process { asin: String },

    /// All stored optimizations for an ASIN, newest first
    History { asin: String },

    /// Recent optimization summaries
    List {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        offset: i64,
    },

    /// One stored optimization by id
    Show { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,listing_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let pool = connect_database(&config.database).await?;
    let deps = ServerDeps::from_config(&config, pool)?;

    let outcome = match cli.command {
        Commands::Process { asin } => render(process_product(&asin, &deps).await, cli.pretty),
        Commands::History { asin } => render(get_asin_history(&asin, &deps).await, cli.pretty),
        Commands::List { limit, offset } => render(
            list_optimizations(Pagination::new(limit, offset), &deps).await,
            cli.pretty,
        ),
        Commands::Show { id } => render(get_optimization(&id, &deps).await, cli.pretty),
    }?;

    if !outcome {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the envelope; returns whether the activity succeeded.
fn render<T: Serialize>(result: Result<T, ListingError>, pretty: bool) -> Result<bool> {
    let (succeeded, json) = match result {
        Ok(data) => (
            true,
            to_json(
                &ApiResponse {
                    success: true,
                    data,
                },
                pretty,
            )?,
        ),
        Err(e) => (
            false,
            to_json(
                &ApiErrorBody {
                    success: false,
                    error: e.to_string(),
                },
                pretty,
            )?,
        ),
    };

    println!("{}", json);
    Ok(succeeded)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
