// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use stockroom_api::params::parse_list_products_params;
use stockroom_store::{
    list_categories, list_products, open_database, reset_database, seed_demo_data, StoreError,
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
enum ExitCode {
    Success = 0,
    Usage = 2,
    Internal = 10,
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Internal(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage(_) => ExitCode::Usage,
            Self::Internal(_) => ExitCode::Internal,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(msg) | Self::Internal(msg) => f.write_str(msg),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotEmpty => Self::Usage(err.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(about = "Stockroom database operations CLI")]
struct Cli {
    /// SQLite database file.
    #[arg(long, global = true, default_value = "stockroom.sqlite")]
    db: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema if it does not exist.
    Init,
    /// Load the demo categories and products into an empty database.
    Seed,
    /// Delete every product and category and restart id numbering.
    Reset,
    /// List products as JSON.
    Products {
        /// Category id or `none`.
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_price: Option<String>,
        #[arg(long)]
        max_price: Option<String>,
        /// `true` or `false`.
        #[arg(long)]
        in_stock: Option<String>,
    },
    /// List categories with their products as JSON.
    Categories,
}

fn main() -> ProcessExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Products {
            category,
            min_price,
            max_price,
            in_stock,
        } => {
            // Parse before opening so bad flags never touch the file.
            let query: BTreeMap<String, String> = [
                ("category", category),
                ("minPrice", min_price),
                ("maxPrice", max_price),
                ("inStock", in_stock),
            ]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
            .collect();
            let filter = parse_list_products_params(&query)
                .map_err(|e| CliError::Usage(e.to_string()))?;
            let conn = open_database(&cli.db)?;
            print_json(&list_products(&conn, &filter)?)
        }
        Commands::Init => {
            open_database(&cli.db)?;
            print_json(&json!({"initialized": cli.db.display().to_string()}))
        }
        Commands::Seed => {
            let conn = open_database(&cli.db)?;
            let report = seed_demo_data(&conn)?;
            print_json(&json!({"categories": report.categories, "products": report.products}))
        }
        Commands::Reset => {
            let conn = open_database(&cli.db)?;
            let report = reset_database(&conn)?;
            print_json(&json!({
                "deletedProducts": report.deleted_products,
                "deletedCategories": report.deleted_categories,
            }))
        }
        Commands::Categories => {
            let conn = open_database(&cli.db)?;
            print_json(&list_categories(&conn)?)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Internal(format!("encode output: {e}")))?;
    println!("{text}");
    Ok(())
}
