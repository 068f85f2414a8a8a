//! Persistence substrate
//!
//! Everything the service persists lives in one flat key-value namespace:
//! string keys (`link.<name>`, `user.<username>`) mapped to JSON values.
//! [`KvStore`] is the seam; [`SeaOrmStore`] is the durable implementation
//! and [`MemoryStore`] the throwaway one.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::DatabaseConfig;
use crate::errors::{LinkShortenerError, Result};

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmStore;
pub use memory::MemoryStore;
pub use models::{LinkRecord, UserPermission, UserRecord};

/// Durable string-keyed store of JSON values.
///
/// Single-key reads and writes are atomic. Multi-step read-modify-write
/// sequences are not; callers that need them serialize on their own.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Point lookup. A missing key is `Ok(None)`, not an error.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Insert or replace the value stored under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove `key`. Returns `true` when something was removed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Every entry whose key starts with `prefix`, in key order.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>>;

    fn backend_name(&self) -> &str;
}

/// 从数据库 URL 推断存储类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("memory://") {
        Ok("memory".to_string())
    } else if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(LinkShortenerError::database_config(format!(
            "Cannot infer storage backend from URL: {}. Supported: memory://, sqlite://, *.db, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn KvStore>> {
        let backend_type = infer_backend_from_url(&config.database_url)?;

        let store: Arc<dyn KvStore> = match backend_type.as_str() {
            "memory" => Arc::new(MemoryStore::new()),
            _ => Arc::new(SeaOrmStore::new(config, &backend_type).await?),
        };

        Ok(store)
    }
}
