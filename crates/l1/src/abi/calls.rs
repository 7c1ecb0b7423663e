use alloy_primitives::FixedBytes;
use alloy_sol_types::{sol, SolCall};

sol! {
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    function commitBatch(
        uint8 version,
        bytes calldata parent_batch_header,
        bytes[] memory chunks,
        bytes calldata skipped_l1_message_bitmap
    ) external;
}

/// An error returned when calldata is not a valid `commitBatch` call.
#[derive(Debug, thiserror::Error)]
pub enum InvalidCommitBatchCall {
    /// The calldata does not hold a function selector.
    #[error("calldata too short to hold a function selector")]
    MissingSelector,
    /// The calldata targets another function of the contract.
    #[error("unexpected function selector {0}")]
    UnexpectedSelector(FixedBytes<4>),
    /// The arguments could not be decoded against the function signature.
    #[error("failed to decode commit batch arguments: {0}")]
    Abi(#[from] alloy_sol_types::Error),
}

/// A call to commit a batch on the L1 Scroll Rollup contract.
#[derive(Debug)]
pub struct CommitBatchCall(commitBatchCall);

impl CommitBatchCall {
    /// Tries to decode the calldata into a [`CommitBatchCall`].
    ///
    /// The calldata is expected to be the outermost call of the transaction.
    pub fn try_decode(calldata: &[u8]) -> Result<Self, InvalidCommitBatchCall> {
        let selector = calldata
            .get(0..4)
            .map(FixedBytes::<4>::from_slice)
            .ok_or(InvalidCommitBatchCall::MissingSelector)?;
        if selector.0 != commitBatchCall::SELECTOR {
            return Err(InvalidCommitBatchCall::UnexpectedSelector(selector))
        }
        Ok(Self(commitBatchCall::abi_decode(calldata)?))
    }

    /// Returns the version for the commit call.
    pub const fn version(&self) -> u8 {
        self.0.version
    }

    /// Returns the parent batch header for the commit call.
    pub fn parent_batch_header(&self) -> &[u8] {
        &self.0.parent_batch_header
    }

    /// Returns the chunks for the commit call.
    pub fn chunks(&self) -> Vec<&[u8]> {
        self.0.chunks.iter().map(|c| c.as_ref()).collect()
    }

    /// Returns the skipped L1 message bitmap for the commit call.
    pub fn skipped_l1_message_bitmap(&self) -> &[u8] {
        &self.0.skipped_l1_message_bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;

    #[test]
    fn test_should_decode_commit_batch_call() -> eyre::Result<()> {
        // Given
        let call = commitBatchCall {
            version: 0,
            parent_batch_header: Bytes::from(vec![0u8; 89]),
            chunks: vec![Bytes::from(vec![0, 2, 0, 0, 0, 0, 0, 0, 0, 5])],
            skipped_l1_message_bitmap: Bytes::new(),
        };
        let calldata = call.abi_encode();

        // When
        let decoded = CommitBatchCall::try_decode(&calldata)?;

        // Then
        assert_eq!(decoded.version(), 0);
        assert_eq!(decoded.parent_batch_header().len(), 89);
        assert_eq!(decoded.chunks(), vec![&[0u8, 2, 0, 0, 0, 0, 0, 0, 0, 5][..]]);
        assert!(decoded.skipped_l1_message_bitmap().is_empty());

        Ok(())
    }

    #[test]
    fn test_should_reject_foreign_selector() {
        let calldata = [0xde, 0xad, 0xbe, 0xef, 0, 0];
        assert!(matches!(
            CommitBatchCall::try_decode(&calldata),
            Err(InvalidCommitBatchCall::UnexpectedSelector(_))
        ));
        assert!(matches!(
            CommitBatchCall::try_decode(&[0x01]),
            Err(InvalidCommitBatchCall::MissingSelector)
        ));
    }

    #[test]
    fn test_should_reject_truncated_arguments() {
        let mut calldata = commitBatchCall::SELECTOR.to_vec();
        calldata.extend_from_slice(&[0u8; 31]);
        assert!(matches!(
            CommitBatchCall::try_decode(&calldata),
            Err(InvalidCommitBatchCall::Abi(_))
        ));
    }
}
