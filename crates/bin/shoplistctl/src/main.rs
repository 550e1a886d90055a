//! # shoplistctl — shopping list command-line tool
//!
//! Composition root that wires the storage adapter into the item service and
//! runs exactly one command per invocation.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Initialize logging
//! - Open the `SQLite` connection handle and make sure the table exists
//! - Construct the repository (adapter) and inject it into the service
//! - Run the command, print its JSON result, and close the handle on every path
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod config;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shoplist_adapter_storage_sqlite_sqlx::{Config as StorageConfig, SqliteItemRepository};
use shoplist_app::services::item_service::ItemService;
use shoplist_domain::error::ShopListError;

use crate::cli::{Args, execute};
use crate::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(err) => return fail(&err),
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database_url().to_string());
    tracing::debug!(%database_url, "opening database");

    let db = match (StorageConfig { database_url }).build().await {
        Ok(db) => db,
        Err(err) => return fail(&ShopListError::from(err)),
    };

    let service = ItemService::new(SqliteItemRepository::new(db.pool().clone()));
    let outcome = execute(&service, args.command, config.pagination.page_size).await;
    db.close().await;

    match outcome {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => fail(&err),
    }
}

/// Log and print `err` with its whole source chain, then signal failure.
fn fail(err: &dyn Error) -> ExitCode {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    tracing::error!(error = %message, "command failed");
    eprintln!("error: {message}");
    ExitCode::FAILURE
}
