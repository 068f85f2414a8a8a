use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::{LinkRegistry, UserStore};
use crate::storage::{KvStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn KvStore>,
    pub registry: Arc<LinkRegistry>,
    pub users: Arc<UserStore>,
}

/// Open storage, seed accounts and build the shared services.
pub async fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", store.backend_name());

    let users = Arc::new(UserStore::new(store.clone()));
    users
        .seed_accounts(&config.auth)
        .await
        .context("Failed to initialize user accounts")?;

    let registry = Arc::new(LinkRegistry::new(store.clone()));

    debug!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        registry,
        users,
    })
}
