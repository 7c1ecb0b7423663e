use crate::abi::logs::{CommitBatch, FinalizeBatch, RevertBatch};

use alloy_primitives::{ruint::UintTryTo, Log, B256, U256};
use alloy_sol_types::SolEvent;

/// A rollup contract event decoded from a log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollupEvent {
    /// A batch was committed.
    Commit {
        /// The index of the batch.
        batch_index: u64,
        /// The hash of the batch.
        batch_hash: B256,
    },
    /// A committed batch was reverted.
    Revert {
        /// The index of the batch.
        batch_index: u64,
        /// The hash of the batch.
        batch_hash: B256,
    },
    /// A batch was finalized.
    Finalize {
        /// The index of the batch.
        batch_index: u64,
        /// The hash of the batch.
        batch_hash: B256,
        /// The L2 state root after the last block of the batch.
        state_root: B256,
        /// The L2 withdraw trie root after the last block of the batch.
        withdraw_root: B256,
    },
}

impl RollupEvent {
    /// Classifies the log by its signature topic and decodes it.
    pub fn try_decode(log: &Log) -> Result<Self, RollupEventError> {
        let signature = log.topics().first().copied().ok_or(RollupEventError::MissingSignature)?;

        match signature {
            CommitBatch::SIGNATURE_HASH => {
                let event = decode::<CommitBatch>(log, "CommitBatch")?;
                Ok(Self::Commit {
                    batch_index: batch_index(event.batch_index)?,
                    batch_hash: event.batch_hash,
                })
            }
            RevertBatch::SIGNATURE_HASH => {
                let event = decode::<RevertBatch>(log, "RevertBatch")?;
                Ok(Self::Revert {
                    batch_index: batch_index(event.batch_index)?,
                    batch_hash: event.batch_hash,
                })
            }
            FinalizeBatch::SIGNATURE_HASH => {
                let event = decode::<FinalizeBatch>(log, "FinalizeBatch")?;
                Ok(Self::Finalize {
                    batch_index: batch_index(event.batch_index)?,
                    batch_hash: event.batch_hash,
                    state_root: event.state_root,
                    withdraw_root: event.withdraw_root,
                })
            }
            other => Err(RollupEventError::UnknownSignature(other)),
        }
    }

    /// Returns the index of the batch the event refers to.
    pub const fn batch_index(&self) -> u64 {
        match self {
            Self::Commit { batch_index, .. } |
            Self::Revert { batch_index, .. } |
            Self::Finalize { batch_index, .. } => *batch_index,
        }
    }
}

fn decode<T: SolEvent>(log: &Log, log_type: &'static str) -> Result<T, RollupEventError> {
    T::decode_log(log)
        .map(|log| log.data)
        .map_err(|error| RollupEventError::DecodeLogFailed { log_type, error })
}

fn batch_index(index: U256) -> Result<u64, RollupEventError> {
    index.uint_try_to().map_err(|_| RollupEventError::BatchIndexOverflow(index))
}

/// An error occurring while decoding a rollup event.
#[derive(Debug, thiserror::Error)]
pub enum RollupEventError {
    /// The log has no topics.
    #[error("log is missing its signature topic")]
    MissingSignature,
    /// The signature does not belong to a tracked rollup event.
    #[error("unknown event signature {0}")]
    UnknownSignature(B256),
    /// The log does not match the layout of its event.
    #[error("failed to decode log of type {log_type}: {error}")]
    DecodeLogFailed {
        /// The expected event type.
        log_type: &'static str,
        /// The decoding error.
        error: alloy_sol_types::Error,
    },
    /// The batch index does not fit in 64 bits.
    #[error("batch index {0} does not fit in u64")]
    BatchIndexOverflow(U256),
}
