use sea_orm_migration::{prelude::*, schema::*};

const HASH_LENGTH: u32 = 32;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FinalizedBatchMeta::Table)
                    .if_not_exists()
                    .col(big_unsigned(FinalizedBatchMeta::BatchIndex).primary_key())
                    .col(binary_len(FinalizedBatchMeta::BatchHash, HASH_LENGTH))
                    .col(big_unsigned(FinalizedBatchMeta::TotalL1MessagesPopped))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FinalizedBatchMeta::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FinalizedBatchMeta {
    Table,
    BatchIndex,
    BatchHash,
    TotalL1MessagesPopped,
}
