use crate::{reconstruct::LocalBatch, ConsistencyFault, RollupSyncError};

use alloy_primitives::B256;
use rollup_node_primitives::{Chunk, FinalizedBatchMeta};
use scroll_codec::{constants::BATCH_HEADER_VERSION, BatchHeaderV0};

/// The commitment of a batch as finalized on the L1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalizedBatch {
    /// The index of the batch.
    pub batch_index: u64,
    /// The hash of the batch.
    pub batch_hash: B256,
    /// The L2 state root after the last block of the batch.
    pub state_root: B256,
    /// The L2 withdraw trie root after the last block of the batch.
    pub withdraw_root: B256,
}

/// Validates the local batch against the batch finalized on the L1.
///
/// The withdraw root and the state root of the last block are checked first, then the batch hash
/// recomputed from the local chunks. On success, returns the [`FinalizedBatchMeta`] of the batch
/// and the number of its last block.
pub fn validate_batch(
    finalized: &FinalizedBatch,
    batch: &LocalBatch,
) -> Result<(FinalizedBatchMeta, u64), RollupSyncError> {
    let batch_index = finalized.batch_index;
    let last_block = batch
        .chunks
        .last()
        .and_then(Chunk::last_block)
        .ok_or(RollupSyncError::EmptyBatch(batch_index))?;

    if last_block.withdraw_root != finalized.withdraw_root {
        return Err(ConsistencyFault::WithdrawRootMismatch {
            batch_index,
            l1: finalized.withdraw_root,
            l2: last_block.withdraw_root,
        }
        .into())
    }

    if last_block.state_root() != finalized.state_root {
        return Err(ConsistencyFault::StateRootMismatch {
            batch_index,
            l1: finalized.state_root,
            l2: last_block.state_root(),
        }
        .into())
    }

    let parent = batch.parent_meta;
    let header = BatchHeaderV0::from_chunks(
        BATCH_HEADER_VERSION,
        batch_index,
        parent.total_l1_messages_popped,
        parent.batch_hash,
        &batch.chunks,
    )?;
    let local_batch_hash = header.hash_slow();
    if local_batch_hash != finalized.batch_hash {
        return Err(ConsistencyFault::BatchHashMismatch {
            batch_index,
            l1: finalized.batch_hash,
            l2: local_batch_hash,
        }
        .into())
    }

    let total_l1_messages_popped =
        batch.chunks.iter().fold(parent.total_l1_messages_popped, |total, chunk| {
            total + chunk.num_l1_messages(total)
        });

    let meta = FinalizedBatchMeta::new(finalized.batch_hash, total_l1_messages_popped);
    Ok((meta, last_block.number()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_consensus::Header;
    use rollup_node_primitives::{L2TransactionData, WrappedBlock};

    fn block(number: u64, transactions: Vec<L2TransactionData>) -> WrappedBlock {
        WrappedBlock {
            header: Header {
                number,
                state_root: B256::with_last_byte(number as u8),
                ..Default::default()
            },
            transactions,
            withdraw_root: B256::repeat_byte(number as u8),
        }
    }

    fn local_batch() -> LocalBatch {
        LocalBatch {
            parent_meta: FinalizedBatchMeta::new(B256::repeat_byte(0xee), 5),
            chunks: vec![
                Chunk::new(vec![
                    block(1, vec![L2TransactionData::l1_message(B256::with_last_byte(1), 5)]),
                    block(2, vec![L2TransactionData::l2(B256::with_last_byte(2))]),
                ]),
                Chunk::new(vec![block(
                    3,
                    vec![
                        L2TransactionData::l1_message(B256::with_last_byte(3), 8),
                        L2TransactionData::l2(B256::with_last_byte(4)),
                    ],
                )]),
            ],
        }
    }

    fn finalized(batch: &LocalBatch) -> FinalizedBatch {
        let header = BatchHeaderV0::from_chunks(
            BATCH_HEADER_VERSION,
            2,
            batch.parent_meta.total_l1_messages_popped,
            batch.parent_meta.batch_hash,
            &batch.chunks,
        )
        .unwrap();
        FinalizedBatch {
            batch_index: 2,
            batch_hash: header.hash_slow(),
            state_root: B256::with_last_byte(3),
            withdraw_root: B256::repeat_byte(3),
        }
    }

    #[test]
    fn test_should_validate_batch() -> eyre::Result<()> {
        // Given
        let batch = local_batch();
        let finalized = finalized(&batch);

        // When
        let (meta, last_block_number) = validate_batch(&finalized, &batch)?;

        // Then messages 5 to 8 are popped, with 6 and 7 skipped.
        assert_eq!(meta, FinalizedBatchMeta::new(finalized.batch_hash, 9));
        assert_eq!(last_block_number, 3);

        Ok(())
    }

    #[test]
    fn test_should_check_withdraw_root_first() {
        // Given every field tampered
        let batch = local_batch();
        let finalized = FinalizedBatch {
            batch_index: 2,
            batch_hash: B256::ZERO,
            state_root: B256::ZERO,
            withdraw_root: B256::ZERO,
        };

        // Then
        let err = validate_batch(&finalized, &batch).unwrap_err();
        assert!(matches!(
            err,
            RollupSyncError::Consistency(ConsistencyFault::WithdrawRootMismatch {
                batch_index: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_should_detect_single_field_tamper() {
        let batch = local_batch();
        let valid = finalized(&batch);

        let mut tampered = valid;
        tampered.state_root.0[0] ^= 1;
        assert!(matches!(
            validate_batch(&tampered, &batch),
            Err(RollupSyncError::Consistency(ConsistencyFault::StateRootMismatch { .. }))
        ));

        let mut tampered = valid;
        tampered.batch_hash.0[31] ^= 1;
        assert!(matches!(
            validate_batch(&tampered, &batch),
            Err(RollupSyncError::Consistency(ConsistencyFault::BatchHashMismatch { .. }))
        ));

        let mut tampered = valid;
        tampered.withdraw_root.0[16] ^= 1;
        assert!(matches!(
            validate_batch(&tampered, &batch),
            Err(RollupSyncError::Consistency(ConsistencyFault::WithdrawRootMismatch { .. }))
        ));
    }

    #[test]
    fn test_should_reject_batch_without_blocks() {
        let batch =
            LocalBatch { parent_meta: Default::default(), chunks: vec![Chunk::new(vec![])] };
        let finalized = FinalizedBatch {
            batch_index: 1,
            batch_hash: B256::ZERO,
            state_root: B256::ZERO,
            withdraw_root: B256::ZERO,
        };
        assert!(matches!(validate_batch(&finalized, &batch), Err(RollupSyncError::EmptyBatch(1))));
    }
}
