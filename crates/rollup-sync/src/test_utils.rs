use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, Log as PrimitiveLog, LogData, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_sol_types::{SolCall, SolEvent};
use rollup_node_primitives::{
    Chunk, ChunkBlockRange, FinalizedBatchMeta, L2BlockData, L2TransactionData,
};
use scroll_codec::{constants::BATCH_HEADER_VERSION, BatchHeaderV0, EncodingError};
use scroll_l1::abi::{
    calls::commitBatchCall,
    logs::{CommitBatch, FinalizeBatch, RevertBatch},
};

/// Returns an arbitrary instance of the passed type.
#[macro_export]
macro_rules! random {
    ($typ: ty) => {{
        let mut bytes = Box::new([0u8; 1024]);
        let mut rng = ::rand::rng();
        ::rand::RngCore::fill_bytes(&mut rng, bytes.as_mut_slice());
        let mut u = ::arbitrary::Unstructured::new(bytes.as_slice());
        <$typ as ::arbitrary::Arbitrary<'_>>::arbitrary(&mut u).unwrap()
    }};
}

/// Returns the calldata of a `commitBatch` call committing chunks of `block_counts` blocks, the
/// first one starting at `start_block_number`.
pub fn commit_batch_calldata(start_block_number: u64, block_counts: &[u16]) -> Bytes {
    let chunks: Vec<Bytes> = block_counts
        .iter()
        .map(|count| {
            let mut chunk = count.to_be_bytes().to_vec();
            chunk.extend_from_slice(&start_block_number.to_be_bytes());
            chunk.extend_from_slice(&[0u8; 50]);
            Bytes::from(chunk)
        })
        .collect();

    commitBatchCall {
        version: BATCH_HEADER_VERSION,
        parent_batch_header: Bytes::from(vec![0u8; BatchHeaderV0::BYTES_LENGTH]),
        chunks,
        skipped_l1_message_bitmap: Bytes::new(),
    }
    .abi_encode()
    .into()
}

/// Returns the RPC log emitted at the provided L1 position.
pub fn rpc_log(
    address: Address,
    data: LogData,
    block_number: u64,
    log_index: u64,
    transaction_hash: B256,
) -> Log {
    Log {
        inner: PrimitiveLog { address, data },
        block_number: Some(block_number),
        log_index: Some(log_index),
        transaction_hash: Some(transaction_hash),
        ..Default::default()
    }
}

/// Returns the log data of a `CommitBatch` event.
pub fn commit_batch_log_data(batch_index: u64, batch_hash: B256) -> LogData {
    CommitBatch { batch_index: U256::from(batch_index), batch_hash }.encode_log_data()
}

/// Returns the log data of a `RevertBatch` event.
pub fn revert_batch_log_data(batch_index: u64, batch_hash: B256) -> LogData {
    RevertBatch { batch_index: U256::from(batch_index), batch_hash }.encode_log_data()
}

/// Returns the log data of a `FinalizeBatch` event.
pub fn finalize_batch_log_data(
    batch_index: u64,
    batch_hash: B256,
    state_root: B256,
    withdraw_root: B256,
) -> LogData {
    FinalizeBatch { batch_index: U256::from(batch_index), batch_hash, state_root, withdraw_root }
        .encode_log_data()
}

/// Returns a random L2 block at the provided height holding the provided transactions.
pub fn l2_block(number: u64, transactions: Vec<L2TransactionData>) -> L2BlockData {
    L2BlockData {
        hash: random!(B256),
        header: Header {
            number,
            state_root: random!(B256),
            timestamp: 1_700_000_000 + number,
            gas_limit: 10_000_000,
            base_fee_per_gas: Some(1_000),
            ..Default::default()
        },
        transactions,
    }
}

/// The commitment of a batch built from local blocks, as it would be finalized on the L1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchCommitment {
    /// The hash of the batch.
    pub batch_hash: B256,
    /// The state root after the last block.
    pub state_root: B256,
    /// The withdraw root after the last block.
    pub withdraw_root: B256,
    /// The total count of L1 messages popped after the batch.
    pub total_l1_messages_popped: u64,
}

/// Computes the commitment of the batch made of the `blocks` split along `ranges`.
pub fn batch_commitment(
    batch_index: u64,
    parent: FinalizedBatchMeta,
    blocks: &[(L2BlockData, B256)],
    ranges: &[ChunkBlockRange],
) -> Result<BatchCommitment, EncodingError> {
    let chunks: Vec<_> = ranges
        .iter()
        .map(|range| {
            Chunk::new(
                blocks
                    .iter()
                    .filter(|(block, _)| range.block_numbers().contains(&block.header.number))
                    .map(|(block, withdraw_root)| block.clone().into_wrapped(*withdraw_root))
                    .collect(),
            )
        })
        .collect();

    let header = BatchHeaderV0::from_chunks(
        BATCH_HEADER_VERSION,
        batch_index,
        parent.total_l1_messages_popped,
        parent.batch_hash,
        &chunks,
    )?;
    let last_block =
        chunks.last().and_then(Chunk::last_block).ok_or(EncodingError::EmptyBatch)?;

    Ok(BatchCommitment {
        batch_hash: header.hash_slow(),
        state_root: last_block.state_root(),
        withdraw_root: last_block.withdraw_root,
        total_l1_messages_popped: header.total_l1_message_popped,
    })
}
