//! Mutation operations for SeaOrmStore

use sea_orm::{ActiveValue::Set, EntityTrait, sea_query::OnConflict};
use serde_json::Value;
use tracing::debug;

use super::{SeaOrmStore, retry};
use crate::errors::{LinkShortenerError, Result};

use migration::entities::kv_entry;

impl SeaOrmStore {
    pub(super) async fn upsert_entry(&self, key: &str, value: &Value) -> Result<()> {
        let db = &self.db;
        let encoded = serde_json::to_string(value)?;

        retry::with_retry(&format!("set({})", key), self.retry_config, || async {
            let model = kv_entry::ActiveModel {
                key: Set(key.to_string()),
                value: Set(encoded.clone()),
            };

            kv_entry::Entity::insert(model)
                .on_conflict(
                    OnConflict::column(kv_entry::Column::Key)
                        .update_column(kv_entry::Column::Value)
                        .to_owned(),
                )
                .exec(db)
                .await
                .map(|_| ())
        })
        .await
        .map_err(|e| LinkShortenerError::database_operation(format!("Write failed: {}", e)))?;

        debug!("Stored key: {}", key);
        Ok(())
    }

    pub(super) async fn delete_entry(&self, key: &str) -> Result<bool> {
        let db = &self.db;
        let key_owned = key.to_string();

        let result = retry::with_retry(&format!("delete({})", key), self.retry_config, || async {
            kv_entry::Entity::delete_by_id(&key_owned).exec(db).await
        })
        .await
        .map_err(|e| LinkShortenerError::database_operation(format!("Delete failed: {}", e)))?;

        Ok(result.rows_affected > 0)
    }
}
