use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BatchChunkRange::Table)
                    .if_not_exists()
                    .col(big_unsigned(BatchChunkRange::BatchIndex))
                    .col(integer(BatchChunkRange::ChunkIndex))
                    .col(big_unsigned(BatchChunkRange::StartBlockNumber))
                    .col(big_unsigned(BatchChunkRange::EndBlockNumber))
                    .primary_key(
                        Index::create()
                            .name("pk_batch_chunk_range")
                            .col(BatchChunkRange::BatchIndex)
                            .col(BatchChunkRange::ChunkIndex),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BatchChunkRange::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BatchChunkRange {
    Table,
    BatchIndex,
    ChunkIndex,
    StartBlockNumber,
    EndBlockNumber,
}
