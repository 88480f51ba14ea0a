//! Loads the remote project collection once and prints it as JSON.

use std::sync::Arc;

use project_manager::adapters::{HttpProjectApi, HttpProjectApiConfig};
use project_manager::application::{ProjectStore, StoreOptions};
use project_manager::config::AppConfig;
use project_manager::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load()?,
    };
    config.validate()?;

    telemetry::init_tracing(&config.logging)?;
    tracing::info!(base_url = %config.api.base_url, "Starting project sync");

    let api = HttpProjectApi::new(HttpProjectApiConfig::from(&config.api))?;
    let mut store = ProjectStore::with_options(Arc::new(api), StoreOptions::from(&config.store));

    store.load().await?;
    tracing::info!(count = store.projects().len(), "Projects loaded");

    println!("{}", serde_json::to_string_pretty(store.projects())?);
    Ok(())
}
