use crate::{constants::MAX_BLOCKS_PER_CHUNK, error::EncodingError, BlockContext};

use alloy_primitives::{keccak256, B256};
use rollup_node_primitives::Chunk;

/// Computes the hash of the chunk given the total count of L1 messages popped before it.
///
/// The hash commits to the first [`BlockContext::HASHED_BYTES_LENGTH`] bytes of each block
/// context, followed by the L1 message hashes then the L2 transaction hashes of every block.
pub fn chunk_hash(
    chunk: &Chunk,
    total_l1_messages_popped_before: u64,
) -> Result<B256, EncodingError> {
    if chunk.blocks.is_empty() {
        return Err(EncodingError::EmptyChunk)
    }
    if chunk.blocks.len() > MAX_BLOCKS_PER_CHUNK {
        return Err(EncodingError::TooManyBlocks(chunk.blocks.len()))
    }

    let tx_count: usize = chunk.blocks.iter().map(|b| b.transactions.len()).sum();
    let mut bytes = Vec::with_capacity(
        chunk.blocks.len() * BlockContext::HASHED_BYTES_LENGTH + tx_count * B256::len_bytes(),
    );

    let mut total_l1_messages_popped = total_l1_messages_popped_before;
    for block in &chunk.blocks {
        let context = BlockContext::try_from_block(block, total_l1_messages_popped)?;
        total_l1_messages_popped += context.num_l1_messages as u64;
        bytes.extend_from_slice(&context.to_be_bytes()[..BlockContext::HASHED_BYTES_LENGTH]);
    }

    for block in &chunk.blocks {
        for tx in block.l1_messages().chain(block.l2_transactions()) {
            bytes.extend_from_slice(tx.hash.as_slice());
        }
    }

    Ok(keccak256(bytes))
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
                timestamp: number * 3,
                gas_limit: 10_000_000,
                ..Default::default()
            },
            transactions,
            withdraw_root: B256::ZERO,
        }
    }

    #[test]
    fn test_should_hash_contexts_then_l1_then_l2_hashes() -> eyre::Result<()> {
        // Given
        let l1 = L2TransactionData::l1_message(B256::with_last_byte(0x11), 0);
        let l2_a = L2TransactionData::l2(B256::with_last_byte(0x22));
        let l2_b = L2TransactionData::l2(B256::with_last_byte(0x33));
        let first = block(10, vec![l1, l2_a]);
        let second = block(11, vec![l2_b]);
        let chunk = Chunk::new(vec![first.clone(), second.clone()]);

        // When
        let hash = chunk_hash(&chunk, 0)?;

        // Then
        let mut expected = Vec::new();
        expected.extend_from_slice(&BlockContext::try_from_block(&first, 0)?.to_be_bytes()[..58]);
        expected.extend_from_slice(&BlockContext::try_from_block(&second, 1)?.to_be_bytes()[..58]);
        expected.extend_from_slice(l1.hash.as_slice());
        expected.extend_from_slice(l2_a.hash.as_slice());
        expected.extend_from_slice(l2_b.hash.as_slice());
        assert_eq!(hash, keccak256(expected));

        Ok(())
    }

    #[test]
    fn test_should_order_l1_messages_first() -> eyre::Result<()> {
        let l1 = L2TransactionData::l1_message(B256::with_last_byte(0x11), 0);
        let l2 = L2TransactionData::l2(B256::with_last_byte(0x22));
        let ordered = Chunk::new(vec![block(1, vec![l1, l2])]);
        let unordered = Chunk::new(vec![block(1, vec![l2, l1])]);
        assert_eq!(chunk_hash(&ordered, 0)?, chunk_hash(&unordered, 0)?);
        Ok(())
    }

    #[test]
    fn test_should_reject_chunk_sizes() {
        assert!(matches!(chunk_hash(&Chunk::new(vec![]), 0), Err(EncodingError::EmptyChunk)));

        let blocks = (0..256).map(|n| block(n, vec![])).collect();
        assert!(matches!(
            chunk_hash(&Chunk::new(blocks), 0),
            Err(EncodingError::TooManyBlocks(256))
        ));
    }
}
