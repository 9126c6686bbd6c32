//! motijheel CLI - Dhaka Stock Exchange share price scraper.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod config;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "motijheel")]
#[command(about = "Scrapes DSE share prices into a TimescaleDB hypertable", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduled worker (every 2 minutes during trading hours)
    Worker,

    /// Trigger a single scrape-validate-insert run
    Run {
        /// Run even when the market-hours gate is closed
        #[arg(long)]
        force: bool,
    },

    /// Inspect stored data (row counts, latest prices, hourly aggregates)
    Verify {
        /// How many latest rows to show
        #[arg(short, long, default_value = "10")]
        limit: i64,

        /// Trading code to aggregate (defaults to the most recent one)
        #[arg(short, long)]
        metric: Option<String>,
    },

    /// Create the schema and hypertable
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = AppConfig::from_env()?;

    match command {
        Commands::Worker => commands::worker::worker(&config).await,
        Commands::Run { force } => commands::run::run_once(&config, force).await,
        Commands::Verify { limit, metric } => {
            commands::verify::verify(&config, limit, metric.as_deref()).await
        }
        Commands::InitDb => commands::init_db::init_db(&config).await,
    }
}
