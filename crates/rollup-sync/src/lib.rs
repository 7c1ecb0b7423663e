//! The rollup sync service of the Scroll rollup node.
//!
//! The service follows the `CommitBatch`, `RevertBatch` and `FinalizeBatch` events of the L1
//! rollup contract. Chunk ranges of committed batches are persisted, and every finalized batch is
//! rebuilt from the local L2 chain and validated against its L1 commitment. A disagreement is a
//! [`ConsistencyFault`] which halts the service.

mod config;
pub use config::{RollupSyncConfig, DEFAULT_FETCH_BLOCK_RANGE, DEFAULT_POLL_INTERVAL};

mod error;
pub use error::{ConsistencyFault, RollupSyncError};

mod handle;
pub use handle::{RollupSyncHandle, RollupSyncStatus};

mod metrics;
pub use metrics::RollupSyncMetrics;

pub mod reconstruct;

mod service;
pub use service::RollupSyncService;

mod syncer;
pub use syncer::RollupEventSyncer;

/// Validation of local batches against the batches finalized on the L1.
pub mod validate;

#[cfg(any(test, feature = "test-utils"))]
/// Common test helpers
pub mod test_utils;
