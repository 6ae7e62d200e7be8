//! keydb CLI
//!
//! Inspect and edit a keydb store on local disk.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use keydb::config::{DEFAULT_INDEX_PATH, DEFAULT_LOG_PATH};
use keydb::{Config, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// keydb CLI
#[derive(Parser, Debug)]
#[command(name = "keydb")]
#[command(about = "Log + index key-value store")]
#[command(version)]
struct Args {
    /// Log file path
    #[arg(short, long, default_value = DEFAULT_LOG_PATH)]
    log: PathBuf,

    /// Index file path
    #[arg(short, long, default_value = DEFAULT_INDEX_PATH)]
    index: PathBuf,

    /// fsync the log after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Set {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Truncate the log and the index
    Flush,

    /// List indexed keys with their byte ranges
    Keys,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,keydb=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .log_path(&args.log)
        .index_path(&args.index)
        .sync_on_write(args.sync)
        .build();

    let store = match Store::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = run(&store, args.command);
    let closed = store.close();

    match (outcome, closed) {
        (Ok(code), Ok(())) => code,
        (Err(e), _) | (Ok(_), Err(e)) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &Store, command: Commands) -> keydb::Result<ExitCode> {
    match command {
        Commands::Get { key } => {
            if !store.contains_key(&key)? {
                tracing::info!("Key {:?} not found", key);
            }
            println!("{}", store.read(&key)?);
        }
        Commands::Set { key, value } => {
            if !store.write(&key, &value)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Flush => store.flush()?,
        Commands::Keys => {
            for (key, entry) in store.snapshot()? {
                println!("{}\t[{}, {})", key, entry.location, entry.end);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
