pub mod cli;
pub mod core;
pub mod feed;
pub mod store;
pub mod sync;

use crate::core::config::AppConfig;
use crate::feed::CnbFeedFetcher;
use crate::store::DiskCurrencyStore;
use crate::sync::RateSyncService;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

pub enum AppCommand {
    Sync,
    Update { code: String },
    Fetch { date: Option<NaiveDate> },
    Rate { code: String, date: Option<NaiveDate> },
    List,
}

/// Runs a command against the configured feed and store and returns what to print.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<String> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store_path = config.data_path()?.join("store");
    std::fs::create_dir_all(&store_path)
        .with_context(|| format!("Failed to create data directory: {}", store_path.display()))?;
    let store = Arc::new(
        DiskCurrencyStore::open(&store_path)
            .with_context(|| format!("Failed to open currency store at {}", store_path.display()))?,
    );
    crate::store::seed_currencies(store.as_ref(), &config.currencies).await?;

    let fetcher = CnbFeedFetcher::new(&config.feed.base_url, config.feed.timeout())?;
    let service = RateSyncService::new(Arc::new(fetcher), store.clone());

    match command {
        AppCommand::Sync => cli::sync::sync_all(&service).await,
        AppCommand::Update { code } => cli::sync::update_one(&service, store.as_ref(), &code).await,
        AppCommand::Fetch { date } => cli::rates::fetch(&service, date).await,
        AppCommand::Rate { code, date } => {
            cli::rates::rate(&service, store.as_ref(), &code, date).await
        }
        AppCommand::List => cli::rates::list(store.as_ref()).await,
    }
}
