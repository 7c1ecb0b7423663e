use alloy_consensus::Header;
use alloy_primitives::B256;

/// The part of an L2 transaction which enters the batch commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct L2TransactionData {
    /// The transaction hash.
    pub hash: B256,
    /// The queue index if the transaction is an L1 message.
    pub queue_index: Option<u64>,
}

impl L2TransactionData {
    /// Returns a new [`L2TransactionData`] for an L2 originated transaction.
    pub const fn l2(hash: B256) -> Self {
        Self { hash, queue_index: None }
    }

    /// Returns a new [`L2TransactionData`] for an L1 message.
    pub const fn l1_message(hash: B256, queue_index: u64) -> Self {
        Self { hash, queue_index: Some(queue_index) }
    }

    /// Returns true if the transaction is an L1 message.
    pub const fn is_l1_message(&self) -> bool {
        self.queue_index.is_some()
    }
}

/// An L2 block as returned by the local chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2BlockData {
    /// The hash of the block.
    pub hash: B256,
    /// The block header.
    pub header: Header,
    /// The ordered transactions of the block.
    pub transactions: Vec<L2TransactionData>,
}

impl L2BlockData {
    /// Wraps the block with the withdraw root read from its post state.
    pub fn into_wrapped(self, withdraw_root: B256) -> WrappedBlock {
        WrappedBlock { header: self.header, transactions: self.transactions, withdraw_root }
    }
}

/// An L2 block along with the withdraw trie root read from its post execution state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedBlock {
    /// The block header.
    pub header: Header,
    /// The ordered transactions of the block.
    pub transactions: Vec<L2TransactionData>,
    /// The withdraw trie root after the block.
    pub withdraw_root: B256,
}

impl WrappedBlock {
    /// Returns the block number.
    pub const fn number(&self) -> u64 {
        self.header.number
    }

    /// Returns the state root after the block.
    pub const fn state_root(&self) -> B256 {
        self.header.state_root
    }

    /// Returns the queue index of the last L1 message included in the block.
    pub fn last_queue_index(&self) -> Option<u64> {
        self.transactions.iter().rev().find_map(|tx| tx.queue_index)
    }

    /// Returns the count of L1 messages popped by the block given the total count popped before
    /// it. Messages skipped by the block are included in the count.
    pub fn num_l1_messages(&self, total_l1_messages_popped_before: u64) -> u64 {
        self.last_queue_index()
            .map(|index| index.saturating_add(1).saturating_sub(total_l1_messages_popped_before))
            .unwrap_or_default()
    }

    /// Returns the count of L2 originated transactions in the block.
    pub fn num_l2_transactions(&self) -> usize {
        self.transactions.iter().filter(|tx| !tx.is_l1_message()).count()
    }

    /// Returns an iterator over the L1 messages of the block.
    pub fn l1_messages(&self) -> impl Iterator<Item = &L2TransactionData> {
        self.transactions.iter().filter(|tx| tx.is_l1_message())
    }

    /// Returns an iterator over the L2 originated transactions of the block.
    pub fn l2_transactions(&self) -> impl Iterator<Item = &L2TransactionData> {
        self.transactions.iter().filter(|tx| !tx.is_l1_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Chunk;

    fn block(number: u64, transactions: Vec<L2TransactionData>) -> WrappedBlock {
        WrappedBlock {
            header: Header { number, ..Default::default() },
            transactions,
            withdraw_root: B256::ZERO,
        }
    }

    #[test]
    fn test_should_count_skipped_l1_messages() {
        // Given a block popping messages 3 to 5, with 3 and 4 skipped.
        let block = block(
            1,
            vec![
                L2TransactionData::l1_message(B256::with_last_byte(5), 5),
                L2TransactionData::l2(B256::with_last_byte(6)),
            ],
        );

        // Then
        assert_eq!(block.num_l1_messages(3), 3);
        assert_eq!(block.num_l2_transactions(), 1);
        assert_eq!(block.last_queue_index(), Some(5));
    }

    #[test]
    fn test_should_not_count_without_l1_messages() {
        let block = block(1, vec![L2TransactionData::l2(B256::with_last_byte(1))]);
        assert_eq!(block.num_l1_messages(10), 0);
    }

    #[test]
    fn test_should_saturate_count_on_max_queue_index() {
        let block =
            block(1, vec![L2TransactionData::l1_message(B256::with_last_byte(1), u64::MAX)]);
        assert_eq!(block.num_l1_messages(u64::MAX - 1), 1);
        assert_eq!(block.num_l1_messages(0), u64::MAX);
    }

    #[test]
    fn test_chunk_should_accumulate_l1_messages() {
        // Given
        let chunk = Chunk::new(vec![
            block(1, vec![L2TransactionData::l1_message(B256::with_last_byte(1), 0)]),
            block(2, vec![]),
            block(
                3,
                vec![
                    L2TransactionData::l1_message(B256::with_last_byte(2), 1),
                    L2TransactionData::l1_message(B256::with_last_byte(3), 3),
                ],
            ),
        ]);

        // Then
        assert_eq!(chunk.num_l1_messages(0), 4);
        assert_eq!(chunk.last_block().map(WrappedBlock::number), Some(3));
    }
}
