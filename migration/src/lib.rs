pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20211101_000001_kv_store;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20211101_000001_kv_store::Migration)]
    }
}
