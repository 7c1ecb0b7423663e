use alloy_primitives::B256;
use alloy_sol_types::{sol, SolEvent};

sol! {
    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event CommitBatch(uint256 indexed batch_index, bytes32 indexed batch_hash);

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event RevertBatch(uint256 indexed batch_index, bytes32 indexed batch_hash);

    #[cfg_attr(feature = "test-utils", derive(arbitrary::Arbitrary))]
    #[derive(Debug)]
    event FinalizeBatch(
        uint256 indexed batch_index,
        bytes32 indexed batch_hash,
        bytes32 state_root,
        bytes32 withdraw_root
    );
}

/// The signatures of the rollup events tracked by the node.
pub const ROLLUP_EVENT_SIGNATURES: [B256; 3] =
    [CommitBatch::SIGNATURE_HASH, RevertBatch::SIGNATURE_HASH, FinalizeBatch::SIGNATURE_HASH];
