//! Create `mep` table.
//!
//! The id mirrors the member's `UserID`, so it is a plain bigint rather than a sequence.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mep::Table)
                    .if_not_exists()
                    .col(big_integer(Mep::Id).primary_key())
                    .col(json_binary(Mep::Data).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Mep::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Mep { Table, Id, Data }
