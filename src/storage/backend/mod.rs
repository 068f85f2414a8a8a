//! SeaORM storage backend
//!
//! Persists the key-value namespace in a single `kv_store` table,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod mutations;
mod query;
pub mod retry;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tracing::info;

use super::KvStore;
use crate::config::DatabaseConfig;
use crate::errors::{LinkShortenerError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// SeaORM-based key-value store
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStore {
    pub async fn new(config: &DatabaseConfig, backend_name: &str) -> Result<Self> {
        if config.database_url.is_empty() {
            return Err(LinkShortenerError::database_config(
                "database_url is not set",
            ));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(&config.database_url).await?
        } else {
            connect_generic(config, backend_name).await?
        };

        let store = SeaOrmStore {
            db,
            backend_name: backend_name.to_string(),
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&store.db).await?;

        info!("{} storage initialized", store.backend_name.to_uppercase());
        Ok(store)
    }
}

/// 将存储的文本列解码为 JSON
fn decode_value(key: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map_err(|e| {
        LinkShortenerError::serialization(format!("Corrupted value under '{}': {}", key, e))
    })
}

#[async_trait]
impl KvStore for SeaOrmStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.get_entry(key).await
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.upsert_entry(key, &value).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.delete_entry(key).await
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>> {
        self.scan_entries(prefix).await
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
