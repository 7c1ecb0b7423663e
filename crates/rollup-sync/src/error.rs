use alloy_primitives::B256;
use rollup_node_primitives::ChunkBlockRange;
use rollup_node_providers::{L1ProviderError, L2ProviderError};
use scroll_codec::{DecodingError, EncodingError};
use scroll_db::DatabaseError;
use scroll_l1::RollupEventError;

/// A disagreement between a finalized batch on the L1 and the local L2 chain.
///
/// The local chain either holds a bug or diverged from the settlement layer, the node must stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyFault {
    /// The withdraw root of the last block of the batch differs.
    #[error("withdraw root mismatch for batch {batch_index}: l1 {l1}, l2 {l2}")]
    WithdrawRootMismatch {
        /// The index of the batch.
        batch_index: u64,
        /// The withdraw root finalized on the L1.
        l1: B256,
        /// The withdraw root of the local chain.
        l2: B256,
    },
    /// The state root of the last block of the batch differs.
    #[error("state root mismatch for batch {batch_index}: l1 {l1}, l2 {l2}")]
    StateRootMismatch {
        /// The index of the batch.
        batch_index: u64,
        /// The state root finalized on the L1.
        l1: B256,
        /// The state root of the local chain.
        l2: B256,
    },
    /// The batch hash recomputed from the local chain differs.
    #[error("batch hash mismatch for batch {batch_index}: l1 {l1}, l2 {l2}")]
    BatchHashMismatch {
        /// The index of the batch.
        batch_index: u64,
        /// The batch hash finalized on the L1.
        l1: B256,
        /// The batch hash recomputed from the local chain.
        l2: B256,
    },
}

impl ConsistencyFault {
    /// Returns the index of the faulty batch.
    pub const fn batch_index(&self) -> u64 {
        match self {
            Self::WithdrawRootMismatch { batch_index, .. } |
            Self::StateRootMismatch { batch_index, .. } |
            Self::BatchHashMismatch { batch_index, .. } => *batch_index,
        }
    }
}

/// An error that occurred in the rollup sync service.
#[derive(Debug, thiserror::Error)]
pub enum RollupSyncError {
    /// An error at the L1 provider.
    #[error("l1 provider error: {0}")]
    L1Provider(#[from] L1ProviderError),
    /// An error at the L2 provider.
    #[error("l2 provider error: {0}")]
    L2Provider(#[from] L2ProviderError),
    /// A database error.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
    /// The log is not a valid rollup event.
    #[error(transparent)]
    Event(#[from] RollupEventError),
    /// The commit calldata could not be decoded into chunk ranges.
    #[error("failed to decode chunk ranges: {0}")]
    Decoding(#[from] DecodingError),
    /// The batch header could not be built from the local blocks.
    #[error("failed to build batch header: {0}")]
    Encoding(#[from] EncodingError),
    /// The commit log does not carry the hash of its transaction.
    #[error("missing transaction hash for commit log of batch {0}")]
    MissingTransactionHash(u64),
    /// No chunk range is stored for the batch.
    #[error("missing chunk ranges for batch {0}")]
    MissingChunkRanges(u64),
    /// No finalized metadata is stored for the parent batch.
    #[error("missing finalized batch meta for batch {0}")]
    MissingParentBatchMeta(u64),
    /// The local chain does not hold the block.
    #[error("missing L2 block {0}")]
    MissingL2Block(u64),
    /// A chunk range points outside the fetched blocks.
    #[error("invalid chunk range {range:?} at chunk {chunk_index} of batch {batch_index}")]
    InvalidChunkRange {
        /// The index of the batch.
        batch_index: u64,
        /// The position of the chunk in the batch.
        chunk_index: usize,
        /// The invalid range.
        range: ChunkBlockRange,
    },
    /// The batch holds no block.
    #[error("empty batch {0}")]
    EmptyBatch(u64),
    /// The local chain disagrees with a finalized batch.
    #[error("consistency fault: {0}")]
    Consistency(#[from] ConsistencyFault),
    /// The sync task terminated abnormally.
    #[error("sync task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RollupSyncError {
    /// Returns true if the error is an unrecoverable consistency fault.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Consistency(_))
    }

    /// Returns true if the error was raised by a remote call and can be retried as is.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::L1Provider(L1ProviderError::Rpc(_)) | Self::L2Provider(L2ProviderError::Rpc(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_transport::TransportErrorKind;

    #[test]
    fn test_should_classify_errors() {
        let fault = ConsistencyFault::StateRootMismatch {
            batch_index: 3,
            l1: B256::ZERO,
            l2: B256::with_last_byte(1),
        };
        let err: RollupSyncError = fault.into();
        assert!(err.is_fatal());
        assert!(!err.is_transient());
        assert_eq!(fault.batch_index(), 3);

        let err = RollupSyncError::MissingChunkRanges(3);
        assert!(!err.is_fatal());
        assert!(!err.is_transient());

        let err: RollupSyncError =
            L1ProviderError::from(TransportErrorKind::custom_str("connection refused")).into();
        assert!(err.is_transient());
        assert!(!err.is_fatal());
    }
}
