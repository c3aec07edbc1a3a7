//! Create `amendment` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Amendment::Table)
                    .if_not_exists()
                    .col(big_integer(Amendment::Id).auto_increment().primary_key())
                    .col(json_binary(Amendment::Data).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Amendment::Table).if_exists().to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Amendment { Table, Id, Data }
