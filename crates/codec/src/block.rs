//! The block context committed for each block of a chunk.

use crate::error::EncodingError;

use alloy_primitives::U256;
use rollup_node_primitives::WrappedBlock;

/// The block's context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContext {
    /// The block number.
    pub number: u64,
    /// The block timestamp.
    pub timestamp: u64,
    /// The block base fee.
    pub base_fee: U256,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The block's transaction count, L1 messages included.
    pub num_transactions: u16,
    /// The block's l1 message count.
    pub num_l1_messages: u16,
}

impl BlockContext {
    /// The length of the encoded context.
    pub const BYTES_LENGTH: usize = 60;

    /// The length of the prefix of the encoded context which enters the chunk hash.
    pub const HASHED_BYTES_LENGTH: usize = 58;

    /// Builds the context of the block given the total count of L1 messages popped before it.
    pub fn try_from_block(
        block: &WrappedBlock,
        total_l1_messages_popped_before: u64,
    ) -> Result<Self, EncodingError> {
        let block_number = block.number();

        let num_l1_messages = block.num_l1_messages(total_l1_messages_popped_before);
        let num_transactions = num_l1_messages + block.num_l2_transactions() as u64;

        Ok(Self {
            number: block_number,
            timestamp: block.header.timestamp,
            base_fee: U256::from(block.header.base_fee_per_gas.unwrap_or_default()),
            gas_limit: block.header.gas_limit,
            num_transactions: num_transactions.try_into().map_err(|_| {
                EncodingError::TooManyTransactions { block_number, count: num_transactions }
            })?,
            num_l1_messages: num_l1_messages.try_into().map_err(|_| {
                EncodingError::TooManyL1Messages { block_number, count: num_l1_messages }
            })?,
        })
    }

    /// Returns the big endian encoding of the context.
    pub fn to_be_bytes(&self) -> [u8; Self::BYTES_LENGTH] {
        let mut bytes = [0u8; Self::BYTES_LENGTH];
        bytes[0..8].copy_from_slice(&self.number.to_be_bytes());
        bytes[8..16].copy_from_slice(&self.timestamp.to_be_bytes());
        bytes[16..48].copy_from_slice(&self.base_fee.to_be_bytes::<32>());
        bytes[48..56].copy_from_slice(&self.gas_limit.to_be_bytes());
        bytes[56..58].copy_from_slice(&self.num_transactions.to_be_bytes());
        bytes[58..60].copy_from_slice(&self.num_l1_messages.to_be_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_consensus::Header;
    use alloy_primitives::B256;
    use rollup_node_primitives::L2TransactionData;

    #[test]
    fn test_should_encode_block_context() -> eyre::Result<()> {
        // Given
        let block = WrappedBlock {
            header: Header {
                number: 680,
                timestamp: 1696933798,
                gas_limit: 10_000_000,
                base_fee_per_gas: Some(0x0102),
                ..Default::default()
            },
            transactions: vec![
                L2TransactionData::l1_message(B256::with_last_byte(1), 4),
                L2TransactionData::l2(B256::with_last_byte(2)),
                L2TransactionData::l2(B256::with_last_byte(3)),
            ],
            withdraw_root: B256::ZERO,
        };

        // When
        let context = BlockContext::try_from_block(&block, 2)?;
        let bytes = context.to_be_bytes();

        // Then
        assert_eq!(context.num_l1_messages, 3);
        assert_eq!(context.num_transactions, 5);
        assert_eq!(&bytes[0..8], &680u64.to_be_bytes());
        assert_eq!(&bytes[8..16], &1696933798u64.to_be_bytes());
        assert_eq!(&bytes[46..48], &[0x01, 0x02]);
        assert_eq!(&bytes[48..56], &10_000_000u64.to_be_bytes());
        assert_eq!(&bytes[56..60], &[0, 5, 0, 3]);

        Ok(())
    }

    #[test]
    fn test_should_reject_oversized_counts() {
        let block = WrappedBlock {
            header: Header { number: 1, ..Default::default() },
            transactions: vec![L2TransactionData::l1_message(B256::ZERO, 70_000)],
            withdraw_root: B256::ZERO,
        };
        assert!(matches!(
            BlockContext::try_from_block(&block, 0),
            Err(EncodingError::TooManyTransactions { block_number: 1, count: 70_001 })
        ));
    }
}
