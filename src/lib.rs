//! Symbol Package Gateway
//!
//! Serves NuGet symbol package (`.snupkg`) downloads out of pluggable file
//! storage:
//! - Deterministic, lower-cased storage naming per package id and version
//! - In-memory, local filesystem and redirecting cloud blob backends
//! - Download results passed through from the backend untouched

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::file_storage::{FileStorageConfig, FileStorageFactory};

/// Build application state from configuration
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = FileStorageConfig::from_settings(&config.storage)?;
    let storage = FileStorageFactory::create(&storage_config)?;

    Ok(AppState::new(storage))
}
