use alloy_primitives::B256;
use std::ops::RangeInclusive;

/// The inclusive range of L2 block numbers committed by a single chunk of a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ChunkBlockRange {
    /// The first block of the chunk.
    pub start_block_number: u64,
    /// The last block of the chunk.
    pub end_block_number: u64,
}

impl ChunkBlockRange {
    /// Returns a new [`ChunkBlockRange`].
    pub const fn new(start_block_number: u64, end_block_number: u64) -> Self {
        Self { start_block_number, end_block_number }
    }

    /// The single chunk of the genesis batch, holding the genesis block.
    pub const fn genesis() -> Self {
        Self::new(0, 0)
    }

    /// Returns true if the start of the range does not exceed its end.
    pub const fn is_valid(&self) -> bool {
        self.start_block_number <= self.end_block_number
    }

    /// Returns the block numbers of the range.
    pub const fn block_numbers(&self) -> RangeInclusive<u64> {
        self.start_block_number..=self.end_block_number
    }
}

/// The metadata persisted for a finalized batch, used as parent metadata when the next batch is
/// finalized.
///
/// The default value is the implicit parent of the genesis batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct FinalizedBatchMeta {
    /// The hash of the batch.
    pub batch_hash: B256,
    /// The total count of L1 messages popped up to and including this batch.
    pub total_l1_messages_popped: u64,
}

impl FinalizedBatchMeta {
    /// Returns a new [`FinalizedBatchMeta`].
    pub const fn new(batch_hash: B256, total_l1_messages_popped: u64) -> Self {
        Self { batch_hash, total_l1_messages_popped }
    }
}
