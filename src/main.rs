use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use everwell::config::{Config, Settings};
use everwell::rewards::RewardsManager;

mod cli;

#[derive(Parser)]
#[command(name = "everwell")]
#[command(about = "Everwell - wellness companion with an XP reward ledger")]
#[command(version)]
struct Cli {
    /// Identity to operate on (defaults to the one in config.toml)
    #[arg(short, long, global = true)]
    identity: Option<String>,

    /// Path to the rewards database (defaults to ~/.everwell/rewards.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current ledger, level progress and percentile tier
    Status,

    /// Award the XP for a completed action
    Award {
        /// Action name (e.g. habit_complete, workout_complete)
        action: String,
    },

    /// Revoke the XP for an undone action
    Revoke {
        /// Action name (e.g. habit_complete, workout_complete)
        action: String,
    },

    /// Grant today's all-habits bonus if not yet granted
    DailyBonus,

    /// Zero the ledger and clear its history
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let settings = Settings::load()?;
    let identity = cli
        .identity
        .or(settings.identity.clone())
        .ok_or_else(|| anyhow::anyhow!("no identity: pass --identity or set it in config.toml"))?;

    let db_path = cli
        .db
        .unwrap_or_else(|| Config::data_dir().join("rewards.db"));
    let storage = everwell::storage::SqliteStore::open(&db_path)?;
    let rewards = RewardsManager::with_settings(std::sync::Arc::new(storage), &settings);

    match cli.command {
        Commands::Status => {
            cli::status::status_command(&rewards, &identity).await?;
        }
        Commands::Award { action } => {
            let kind = cli::parse_action(&action)?;
            cli::ledger::award_command(&rewards, &identity, kind).await?;
        }
        Commands::Revoke { action } => {
            let kind = cli::parse_action(&action)?;
            cli::ledger::revoke_command(&rewards, &identity, kind).await?;
        }
        Commands::DailyBonus => {
            cli::bonus::daily_bonus_command(&rewards, &identity).await?;
        }
        Commands::Reset => {
            cli::ledger::reset_command(&rewards, &identity).await?;
        }
    }

    Ok(())
}
