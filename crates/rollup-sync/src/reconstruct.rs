//! Reconstruction of the chunks of a batch from the local L2 chain.

use crate::RollupSyncError;

use rollup_node_primitives::{Chunk, ChunkBlockRange, FinalizedBatchMeta, WrappedBlock};
use rollup_node_providers::L2BlockProvider;
use scroll_db::DatabaseOperations;

/// A batch rebuilt from the local L2 chain, along with the metadata of its parent batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBatch {
    /// The metadata of the parent batch.
    pub parent_meta: FinalizedBatchMeta,
    /// The chunks of the batch.
    pub chunks: Vec<Chunk>,
}

/// Rebuilds the batch at `batch_index` from its persisted chunk ranges and the local blocks.
pub async fn reconstruct_batch<L2, DB>(
    l2_provider: &L2,
    database: &DB,
    batch_index: u64,
) -> Result<LocalBatch, RollupSyncError>
where
    L2: L2BlockProvider,
    DB: DatabaseOperations + Sync,
{
    let ranges = database
        .get_batch_chunk_ranges(batch_index)
        .await?
        .ok_or(RollupSyncError::MissingChunkRanges(batch_index))?;

    for (chunk_index, range) in ranges.iter().enumerate() {
        if !range.is_valid() {
            return Err(RollupSyncError::InvalidChunkRange {
                batch_index,
                chunk_index,
                range: *range,
            })
        }
    }

    let blocks = fetch_blocks(l2_provider, &ranges).await?;
    let chunks = into_chunks(batch_index, blocks, &ranges)?;

    let parent_meta = if batch_index == 0 {
        FinalizedBatchMeta::default()
    } else {
        database
            .get_finalized_batch_meta(batch_index - 1)
            .await?
            .ok_or(RollupSyncError::MissingParentBatchMeta(batch_index - 1))?
    };

    Ok(LocalBatch { parent_meta, chunks })
}

/// Fetches every block of the ranges along with its withdraw root, in range order.
async fn fetch_blocks<L2: L2BlockProvider>(
    l2_provider: &L2,
    ranges: &[ChunkBlockRange],
) -> Result<Vec<WrappedBlock>, RollupSyncError> {
    let mut blocks = Vec::new();
    for range in ranges {
        for number in range.block_numbers() {
            let block = l2_provider
                .block_by_number(number)
                .await?
                .ok_or(RollupSyncError::MissingL2Block(number))?;
            let withdraw_root = l2_provider.withdraw_root(block.hash).await?;
            blocks.push(block.into_wrapped(withdraw_root));
        }
    }
    Ok(blocks)
}

/// Splits the blocks into chunks following the ranges, offset by the number of the first block.
pub fn into_chunks(
    batch_index: u64,
    blocks: Vec<WrappedBlock>,
    ranges: &[ChunkBlockRange],
) -> Result<Vec<Chunk>, RollupSyncError> {
    let min_block_number =
        blocks.first().map(WrappedBlock::number).ok_or(RollupSyncError::EmptyBatch(batch_index))?;

    ranges
        .iter()
        .enumerate()
        .map(|(chunk_index, range)| {
            let invalid = || RollupSyncError::InvalidChunkRange {
                batch_index,
                chunk_index,
                range: *range,
            };
            let offset = |number: u64| {
                number
                    .checked_sub(min_block_number)
                    .and_then(|offset| usize::try_from(offset).ok())
                    .ok_or_else(invalid)
            };

            let (start, end) = (offset(range.start_block_number)?, offset(range.end_block_number)?);
            if start > end || end >= blocks.len() {
                return Err(invalid())
            }
            Ok(Chunk::new(blocks[start..=end].to_vec()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_consensus::Header;
    use alloy_primitives::B256;

    fn blocks(numbers: std::ops::RangeInclusive<u64>) -> Vec<WrappedBlock> {
        numbers
            .map(|number| WrappedBlock {
                header: Header { number, ..Default::default() },
                transactions: vec![],
                withdraw_root: B256::ZERO,
            })
            .collect()
    }

    #[test]
    fn test_should_split_blocks_into_chunks() -> eyre::Result<()> {
        // Given
        let ranges = [ChunkBlockRange::new(10, 12), ChunkBlockRange::new(13, 13)];

        // When
        let chunks = into_chunks(1, blocks(10..=13), &ranges)?;

        // Then
        assert_eq!(chunks.len(), 2);
        let numbers = chunks[0].blocks.iter().map(WrappedBlock::number).collect::<Vec<_>>();
        assert_eq!(numbers, [10, 11, 12]);
        assert_eq!(chunks[1].blocks.iter().map(WrappedBlock::number).collect::<Vec<_>>(), [13]);

        Ok(())
    }

    #[test]
    fn test_should_reject_out_of_bounds_ranges() {
        for range in [
            ChunkBlockRange::new(9, 10),
            ChunkBlockRange::new(12, 14),
            ChunkBlockRange::new(12, 11),
        ] {
            let result = into_chunks(1, blocks(10..=13), &[range]);
            assert!(
                matches!(result, Err(RollupSyncError::InvalidChunkRange { chunk_index: 0, .. })),
                "{range:?}"
            );
        }
    }

    #[test]
    fn test_should_reject_empty_batch() {
        let result = into_chunks(4, vec![], &[ChunkBlockRange::genesis()]);
        assert!(matches!(result, Err(RollupSyncError::EmptyBatch(4))));
    }
}
