use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(kv_store_table(manager.get_database_backend()))
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KvStore::Table).to_owned())
            .await
    }
}

/// 创建 kv_store 表：link.* 与 user.* 记录共用一张表
///
/// Keys compare byte-wise on every backend. MySQL's default collation is
/// case-insensitive, so the key column gets a binary one there.
fn kv_store_table(backend: DatabaseBackend) -> TableCreateStatement {
    let mut key = ColumnDef::new(KvStore::Key);
    key.string().not_null().primary_key();
    if backend == DatabaseBackend::MySql {
        key.extra("COLLATE utf8mb4_bin");
    }

    Table::create()
        .table(KvStore::Table)
        .if_not_exists()
        .col(key)
        .col(ColumnDef::new(KvStore::Value).text().not_null())
        .to_owned()
}

#[derive(DeriveIden)]
enum KvStore {
    #[sea_orm(iden = "kv_store")]
    Table,
    Key,
    Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_key_column_is_case_sensitive() {
        let sql = DatabaseBackend::MySql
            .build(&kv_store_table(DatabaseBackend::MySql))
            .sql;
        assert!(sql.contains("COLLATE utf8mb4_bin"), "{}", sql);
    }

    #[test]
    fn test_other_backends_keep_default_collation() {
        for backend in [DatabaseBackend::Sqlite, DatabaseBackend::Postgres] {
            let sql = backend.build(&kv_store_table(backend)).sql;
            assert!(!sql.contains("COLLATE"), "{}", sql);
            assert!(sql.contains("kv_store"));
        }
    }
}
