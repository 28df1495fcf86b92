//! cacheside - operator CLI
//!
//! Inspect and evict entries of the configured cache backend.
//!
//! | Command | Output |
//! |---------|--------|
//! | `get KEY` | cached JSON value; exit code 1 on a miss |
//! | `set KEY JSON [--ttl-ms N]` | `OK` |
//! | `delete KEY` / `exists KEY` | `true` or `false` |
//! | `reset NAMESPACE` | number of deleted keys |
//! | `providers` | registered backends |

// Force-link cacheside-providers to ensure linkme registrations are included
extern crate cacheside_providers;

use anyhow::Context;
use cacheside::application::ports::registry::list_cache_providers;
use cacheside::{CacheRead, CacheService, ConfigLoader, build_cache_service, init_logging};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command line interface for cacheside
#[derive(Parser, Debug)]
#[command(name = "cacheside")]
#[command(about = "Cache-aside layer - inspect and invalidate cached entries")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered cache providers
    Providers,
    #[command(flatten)]
    Cache(CacheCommand),
}

/// Commands that talk to the configured backend
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Print the value cached under KEY
    Get { key: String },
    /// Cache a JSON value under KEY
    Set {
        key: String,
        /// JSON document to store
        json: String,
        /// TTL in milliseconds; zero or negative uses the configured default
        #[arg(long, allow_hyphen_values = true)]
        ttl_ms: Option<i64>,
    },
    /// Delete KEY
    Delete { key: String },
    /// Check whether KEY holds a value
    Exists { key: String },
    /// Delete every key under NAMESPACE
    Reset { namespace: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Providers => {
            for (name, description) in list_cache_providers() {
                println!("{name:<8} {description}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Cache(command) => run(cli.config.as_deref(), command).await,
    }
}

async fn run(config_path: Option<&Path>, command: CacheCommand) -> anyhow::Result<ExitCode> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("Failed to load configuration")?;
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let cache = build_cache_service(&config.cache).context("Failed to create cache service")?;

    match command {
        CacheCommand::Get { key } => match cache.get::<serde_json::Value>(&key).await? {
            CacheRead::Hit(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            CacheRead::Miss => {
                eprintln!("miss: {key}");
                return Ok(ExitCode::from(1));
            }
        },
        CacheCommand::Set { key, json, ttl_ms } => {
            let value: serde_json::Value =
                serde_json::from_str(&json).context("Value must be a JSON document")?;
            let ttl = ttl_ms.and_then(CacheService::ttl_from_millis);
            cache.set(&key, &value, ttl).await?;
            println!("OK");
        }
        CacheCommand::Delete { key } => println!("{}", cache.delete(&key).await?),
        CacheCommand::Exists { key } => println!("{}", cache.exists(&key).await?),
        CacheCommand::Reset { namespace } => {
            println!("{}", cache.reset_namespace(&namespace).await?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
