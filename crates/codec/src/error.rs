use scroll_l1::abi::calls::InvalidCommitBatchCall;

/// An error occurring during the decoding of the commit calldata.
#[derive(Debug, thiserror::Error)]
pub enum DecodingError {
    /// The calldata is not a valid `commitBatch` call.
    #[error(transparent)]
    InvalidCommitBatchCall(#[from] InvalidCommitBatchCall),
    /// The call does not commit any chunk.
    #[error("missing chunk data")]
    MissingChunkData,
    /// A chunk is too short for the fields read from it.
    #[error("end of file")]
    Eof,
    /// The block count of a chunk does not fit in a single byte.
    #[error("invalid block count {num_blocks} for chunk {chunk_index}")]
    InvalidBlockCount {
        /// The position of the chunk in the batch.
        chunk_index: usize,
        /// The decoded block count.
        num_blocks: u16,
    },
    /// A chunk commits no block.
    #[error("chunk {0} has no block")]
    EmptyChunk(usize),
    /// The block numbers of the batch overflow.
    #[error("block number overflow at chunk {0}")]
    BlockNumberOverflow(usize),
}

/// An error occurring during the encoding of local blocks into the batch commitment.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// The batch holds no chunk.
    #[error("batch has no chunk")]
    EmptyBatch,
    /// The chunk holds no block.
    #[error("chunk has no block")]
    EmptyChunk,
    /// The chunk holds more blocks than a chunk can commit.
    #[error("chunk holds {0} blocks, exceeding the maximum of 255")]
    TooManyBlocks(usize),
    /// The L1 message count of a block does not fit in its context.
    #[error("block {block_number} pops {count} L1 messages, exceeding the maximum of 65535")]
    TooManyL1Messages {
        /// The number of the block.
        block_number: u64,
        /// The count of L1 messages.
        count: u64,
    },
    /// The transaction count of a block does not fit in its context.
    #[error("block {block_number} holds {count} transactions, exceeding the maximum of 65535")]
    TooManyTransactions {
        /// The number of the block.
        block_number: u64,
        /// The count of transactions.
        count: u64,
    },
    /// An L1 message has a queue index lower than the next expected one.
    #[error(
        "unexpected queue index in block {block_number}: expected at least {expected}, got {got}"
    )]
    QueueIndexRegression {
        /// The number of the block.
        block_number: u64,
        /// The next expected queue index.
        expected: u64,
        /// The queue index found.
        got: u64,
    },
}
