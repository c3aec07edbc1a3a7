//! Create `dossier` table.
//!
//! Keyed by the procedure reference, which is copied out of the document at write time.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dossier::Table)
                    .if_not_exists()
                    .col(string(Dossier::Id).primary_key())
                    .col(json_binary(Dossier::Data).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Dossier::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Dossier { Table, Id, Data }
