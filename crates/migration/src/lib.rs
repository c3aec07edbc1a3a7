//! Migrator creating one document table per record kind.
//!
//! Every table is `(id, data jsonb)`; each migration uses `IF NOT EXISTS`
//! so running the migrator against a partially bootstrapped database is safe.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_dossier;
mod m20240101_000002_create_mep;
mod m20240101_000003_create_vote;
mod m20240101_000004_create_meeting;
mod m20240101_000005_create_amendment;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_dossier::Migration),
            Box::new(m20240101_000002_create_mep::Migration),
            Box::new(m20240101_000003_create_vote::Migration),
            Box::new(m20240101_000004_create_meeting::Migration),
            Box::new(m20240101_000005_create_amendment::Migration),
        ]
    }
}
