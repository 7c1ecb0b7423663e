use super::{models, DatabaseError};
use crate::{
    models::metadata::{FINALIZED_L2_BLOCK_NUMBER_KEY, ROLLUP_EVENT_SYNCED_L1_BLOCK_NUMBER_KEY},
    DatabaseConnectionProvider,
};

use rollup_node_primitives::{ChunkBlockRange, FinalizedBatchMeta};
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

/// The [`DatabaseOperations`] trait provides methods for interacting with the database.
///
/// Every write is keyed and can be repeated with the same arguments without changing the
/// resulting state.
#[async_trait::async_trait]
pub trait DatabaseOperations: DatabaseConnectionProvider {
    /// Get the last L1 block number whose rollup events were fully applied.
    async fn get_rollup_event_synced_l1_block_number(&self) -> Result<Option<u64>, DatabaseError> {
        get_block_number(self.get_connection(), ROLLUP_EVENT_SYNCED_L1_BLOCK_NUMBER_KEY).await
    }

    /// Set the last L1 block number whose rollup events were fully applied.
    async fn set_rollup_event_synced_l1_block_number(
        &self,
        block_number: u64,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(
            target: "scroll::db",
            block_number,
            "Updating rollup event synced L1 block number in database."
        );
        set_block_number(
            self.get_connection(),
            ROLLUP_EVENT_SYNCED_L1_BLOCK_NUMBER_KEY,
            block_number,
        )
        .await
    }

    /// Get the last finalized L2 block number.
    async fn get_finalized_l2_block_number(&self) -> Result<Option<u64>, DatabaseError> {
        get_block_number(self.get_connection(), FINALIZED_L2_BLOCK_NUMBER_KEY).await
    }

    /// Set the last finalized L2 block number.
    async fn set_finalized_l2_block_number(&self, block_number: u64) -> Result<(), DatabaseError> {
        tracing::trace!(
            target: "scroll::db",
            block_number,
            "Updating finalized L2 block number in database."
        );
        set_block_number(self.get_connection(), FINALIZED_L2_BLOCK_NUMBER_KEY, block_number).await
    }

    /// Insert the chunk ranges of the batch, replacing any ranges previously stored for the batch.
    async fn insert_batch_chunk_ranges(
        &self,
        batch_index: u64,
        chunk_ranges: Vec<ChunkBlockRange>,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(
            target: "scroll::db",
            batch_index,
            ?chunk_ranges,
            "Inserting batch chunk ranges into database."
        );
        self.delete_batch_chunk_ranges(batch_index).await?;
        if chunk_ranges.is_empty() {
            return Ok(())
        }

        let models = chunk_ranges.into_iter().enumerate().map(|(chunk_index, range)| {
            models::batch_chunk_range::ActiveModel::new(batch_index, chunk_index, range)
        });
        models::batch_chunk_range::Entity::insert_many(models)
            .exec_without_returning(self.get_connection())
            .await?;

        Ok(())
    }

    /// Get the chunk ranges of the batch ordered by chunk position, or [`None`] if no range is
    /// stored for the batch.
    async fn get_batch_chunk_ranges(
        &self,
        batch_index: u64,
    ) -> Result<Option<Vec<ChunkBlockRange>>, DatabaseError> {
        let ranges: Vec<ChunkBlockRange> = models::batch_chunk_range::Entity::find()
            .filter(models::batch_chunk_range::Column::BatchIndex.eq(batch_index as i64))
            .order_by_asc(models::batch_chunk_range::Column::ChunkIndex)
            .all(self.get_connection())
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok((!ranges.is_empty()).then_some(ranges))
    }

    /// Delete the chunk ranges of the batch. Returns the count of deleted ranges.
    async fn delete_batch_chunk_ranges(&self, batch_index: u64) -> Result<u64, DatabaseError> {
        tracing::trace!(
            target: "scroll::db",
            batch_index,
            "Deleting batch chunk ranges from database."
        );
        Ok(models::batch_chunk_range::Entity::delete_many()
            .filter(models::batch_chunk_range::Column::BatchIndex.eq(batch_index as i64))
            .exec(self.get_connection())
            .await
            .map(|res| res.rows_affected)?)
    }

    /// Insert the [`FinalizedBatchMeta`] of the batch. Metadata already stored for the batch is
    /// left untouched.
    async fn insert_finalized_batch_meta(
        &self,
        batch_index: u64,
        meta: FinalizedBatchMeta,
    ) -> Result<(), DatabaseError> {
        tracing::trace!(
            target: "scroll::db",
            batch_index,
            ?meta,
            "Inserting finalized batch meta into database."
        );
        models::finalized_batch_meta::Entity::insert(
            models::finalized_batch_meta::ActiveModel::new(batch_index, meta),
        )
        .on_conflict(
            OnConflict::column(models::finalized_batch_meta::Column::BatchIndex)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.get_connection())
        .await?;

        Ok(())
    }

    /// Get the [`FinalizedBatchMeta`] of the batch.
    async fn get_finalized_batch_meta(
        &self,
        batch_index: u64,
    ) -> Result<Option<FinalizedBatchMeta>, DatabaseError> {
        models::finalized_batch_meta::Entity::find_by_id(batch_index as i64)
            .one(self.get_connection())
            .await?
            .map(TryInto::try_into)
            .transpose()
    }

    /// Get the index of the latest finalized batch.
    async fn get_latest_finalized_batch_index(&self) -> Result<Option<u64>, DatabaseError> {
        Ok(models::finalized_batch_meta::Entity::find()
            .order_by_desc(models::finalized_batch_meta::Column::BatchIndex)
            .limit(1)
            .one(self.get_connection())
            .await?
            .map(|model| model.batch_index()))
    }
}

impl<T> DatabaseOperations for T where T: DatabaseConnectionProvider {}

async fn get_block_number<C: sea_orm::ConnectionTrait>(
    connection: &C,
    key: &'static str,
) -> Result<Option<u64>, DatabaseError> {
    models::metadata::Entity::find_by_id(key.to_owned())
        .one(connection)
        .await?
        .map(|model| {
            model
                .value
                .parse()
                .map_err(|_| DatabaseError::InvalidMetadata { key, value: model.value })
        })
        .transpose()
}

async fn set_block_number<C: sea_orm::ConnectionTrait>(
    connection: &C,
    key: &'static str,
    block_number: u64,
) -> Result<(), DatabaseError> {
    models::metadata::Entity::insert(models::metadata::ActiveModel::block_number(key, block_number))
        .on_conflict(
            OnConflict::column(models::metadata::Column::Key)
                .update_column(models::metadata::Column::Value)
                .to_owned(),
        )
        .exec(connection)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    use alloy_primitives::B256;
    use arbitrary::{Arbitrary, Unstructured};
    use rand::Rng;

    #[tokio::test]
    async fn test_should_round_trip_block_numbers() -> eyre::Result<()> {
        // Given
        let db = setup_test_db().await;
        assert_eq!(db.get_rollup_event_synced_l1_block_number().await?, None);
        assert_eq!(db.get_finalized_l2_block_number().await?, None);

        // When
        db.set_rollup_event_synced_l1_block_number(100).await?;
        db.set_rollup_event_synced_l1_block_number(u64::MAX).await?;
        db.set_finalized_l2_block_number(42).await?;

        // Then
        assert_eq!(db.get_rollup_event_synced_l1_block_number().await?, Some(u64::MAX));
        assert_eq!(db.get_finalized_l2_block_number().await?, Some(42));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_replace_and_delete_chunk_ranges() -> eyre::Result<()> {
        // Given
        let db = setup_test_db().await;
        let ranges = vec![ChunkBlockRange::new(1, 3), ChunkBlockRange::new(4, 4)];
        let replacement = vec![ChunkBlockRange::new(1, 10)];

        // When
        db.insert_batch_chunk_ranges(7, ranges.clone()).await?;
        db.insert_batch_chunk_ranges(8, replacement.clone()).await?;

        // Then
        assert_eq!(db.get_batch_chunk_ranges(7).await?, Some(ranges));
        db.insert_batch_chunk_ranges(7, replacement.clone()).await?;
        assert_eq!(db.get_batch_chunk_ranges(7).await?, Some(replacement.clone()));

        assert_eq!(db.delete_batch_chunk_ranges(7).await?, 1);
        assert_eq!(db.delete_batch_chunk_ranges(7).await?, 0);
        assert_eq!(db.get_batch_chunk_ranges(7).await?, None);
        assert_eq!(db.get_batch_chunk_ranges(8).await?, Some(replacement));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_keep_chunk_order() -> eyre::Result<()> {
        let db = setup_test_db().await;
        let ranges: Vec<_> = (0..20u64).map(|i| ChunkBlockRange::new(i * 10, i * 10 + 9)).collect();

        db.insert_batch_chunk_ranges(1, ranges.clone()).await?;

        assert_eq!(db.get_batch_chunk_ranges(1).await?, Some(ranges));
        Ok(())
    }

    #[tokio::test]
    async fn test_should_not_overwrite_finalized_batch_meta() -> eyre::Result<()> {
        // Given
        let db = setup_test_db().await;
        let mut bytes = [0u8; 1024];
        rand::rng().fill(bytes.as_mut_slice());
        let mut u = Unstructured::new(&bytes);
        let meta = FinalizedBatchMeta::arbitrary(&mut u)?;
        let meta = FinalizedBatchMeta::new(meta.batch_hash, meta.total_l1_messages_popped >> 1);

        // When
        db.insert_finalized_batch_meta(3, meta).await?;
        db.insert_finalized_batch_meta(3, meta).await?;
        db.insert_finalized_batch_meta(3, FinalizedBatchMeta::new(B256::ZERO, 0)).await?;

        // Then
        assert_eq!(db.get_finalized_batch_meta(3).await?, Some(meta));
        assert_eq!(db.get_finalized_batch_meta(4).await?, None);
        assert_eq!(db.get_latest_finalized_batch_index().await?, Some(3));

        Ok(())
    }

    #[tokio::test]
    async fn test_should_return_latest_finalized_batch_index() -> eyre::Result<()> {
        let db = setup_test_db().await;
        assert_eq!(db.get_latest_finalized_batch_index().await?, None);

        for index in [0u64, 2, 1] {
            db.insert_finalized_batch_meta(index, FinalizedBatchMeta::default()).await?;
        }

        assert_eq!(db.get_latest_finalized_batch_index().await?, Some(2));
        Ok(())
    }
}
