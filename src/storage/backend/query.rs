//! Query operations for SeaOrmStore

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde_json::Value;
use tracing::debug;

use super::{SeaOrmStore, decode_value, retry};
use crate::errors::{LinkShortenerError, Result};

use migration::entities::kv_entry;

impl SeaOrmStore {
    pub(super) async fn get_entry(&self, key: &str) -> Result<Option<Value>> {
        let db = &self.db;
        let key_owned = key.to_string();

        let model = retry::with_retry(&format!("get({})", key), self.retry_config, || async {
            kv_entry::Entity::find_by_id(&key_owned).one(db).await
        })
        .await
        .map_err(|e| LinkShortenerError::database_operation(format!("Lookup failed: {}", e)))?;

        model.map(|m| decode_value(&m.key, &m.value)).transpose()
    }

    pub(super) async fn scan_entries(&self, prefix: &str) -> Result<Vec<(String, Value)>> {
        let db = &self.db;
        let prefix_owned = prefix.to_string();

        let models = retry::with_retry(
            &format!("scan_prefix({})", prefix),
            self.retry_config,
            || async {
                kv_entry::Entity::find()
                    .filter(kv_entry::Column::Key.starts_with(&prefix_owned))
                    .order_by_asc(kv_entry::Column::Key)
                    .all(db)
                    .await
            },
        )
        .await
        .map_err(|e| LinkShortenerError::database_operation(format!("Prefix scan failed: {}", e)))?;

        // LIKE 在 SQLite / MySQL 下大小写不敏感，这里按字节再过滤一次
        let entries = models
            .into_iter()
            .filter(|m| m.key.starts_with(prefix))
            .map(|m| decode_value(&m.key, &m.value).map(|v| (m.key, v)))
            .collect::<Result<Vec<_>>>()?;

        debug!("Prefix '{}' matched {} entries", prefix, entries.len());
        Ok(entries)
    }
}
