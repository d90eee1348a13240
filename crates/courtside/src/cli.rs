//! Operator command line
//!
//! Each subcommand builds an [`EphemeralState`] from the layered
//! configuration, runs one operation and prints the outcome as JSON on
//! stdout. Logs go to stderr.

use anyhow::Context;
use clap::{Parser, Subcommand};
use courtside_infrastructure::logging::init_logging;
use courtside_infrastructure::{ConfigLoader, EphemeralState};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Command line interface for Courtside ephemeral state
#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(about = "Courtside - shared cache, rate limiting and invalidation")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ping the remote backend and report mode, counters and fallback size
    Status,
    /// Print the effective configuration
    Config,
    /// Read a cached payload
    Get {
        /// Cache key
        key: String,
    },
    /// Store a payload
    Set {
        /// Cache key
        key: String,
        /// Payload to store
        value: String,
        /// Expiry in seconds (0 never expires; default from configuration)
        #[arg(long)]
        ttl_secs: Option<u64>,
    },
    /// Remove a key from both backends
    Delete {
        /// Cache key
        key: String,
    },
    /// Remove every key under one or more prefixes
    Purge {
        /// Key prefixes
        #[arg(required = true)]
        prefixes: Vec<String>,
    },
    /// Evict cached predictions and context for a model artifact
    PurgeModel {
        /// Model artifact id
        model_id: String,
    },
    /// Take tokens from a rate-limit bucket
    Acquire {
        /// Bucket key
        key: String,
        /// Tokens to take
        #[arg(long, default_value_t = 1)]
        amount: u32,
        /// How long to wait for a refill (default from configuration)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Bucket capacity override, in requests per minute
        #[arg(long)]
        rpm: Option<u32>,
    },
}

/// Load configuration, run `cli.command` and print its result
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let state = EphemeralState::init(&config)
        .await
        .context("Failed to initialize ephemeral state")?;
    let output = execute(&state, cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    let snapshot = state.shutdown();
    debug!(?snapshot, "Command finished");
    Ok(())
}

/// Run one command against `state`
pub async fn execute(state: &EphemeralState, command: Command) -> anyhow::Result<Value> {
    let output = match command {
        Command::Status => serde_json::to_value(state.health().await)?,
        Command::Config => serde_json::to_value(state.config())?,
        Command::Get { key } => {
            let value = state.cache().get(&key).await;
            json!({ "key": key, "value": value })
        }
        Command::Set {
            key,
            value,
            ttl_secs,
        } => {
            let stored = match ttl_secs {
                Some(secs) => {
                    state
                        .cache()
                        .set(&key, &value, Some(Duration::from_secs(secs)))
                        .await
                }
                None => state.cache().set_default(&key, &value).await,
            };
            json!({ "key": key, "stored": stored })
        }
        Command::Delete { key } => {
            let removed = state.cache().delete(&key).await;
            json!({ "key": key, "removed": removed })
        }
        Command::Purge { prefixes } => {
            serde_json::to_value(state.invalidation().purge(&prefixes).await)?
        }
        Command::PurgeModel { model_id } => {
            serde_json::to_value(state.invalidation().purge_model_artifact(&model_id).await)?
        }
        Command::Acquire {
            key,
            amount,
            timeout_ms,
            rpm,
        } => {
            let limiter = match rpm {
                Some(rpm) if rpm > 0 => state.rate_limiter().with_rate(rpm),
                Some(_) => anyhow::bail!("--rpm must be greater than 0"),
                None => state.rate_limiter().clone(),
            };
            let granted = match timeout_ms {
                Some(ms) => {
                    limiter
                        .acquire(&key, amount, Duration::from_millis(ms))
                        .await
                }
                None => limiter.acquire_default(&key, amount).await,
            };
            json!({
                "key": key,
                "amount": amount,
                "granted": granted,
                "realization": limiter.realization(),
            })
        }
    };
    Ok(output)
}
