//! The crate exposes the providers used by the rollup sync service to read the L1 rollup contract
//! and the local L2 chain, along with their RPC backed implementations.

pub use l1::{L1ProviderError, L1RollupProvider, OnlineL1RollupProvider};
mod l1;

pub use l2::{L2BlockProvider, L2ProviderError, OnlineL2BlockProvider};
mod l2;

#[cfg(any(test, feature = "test-utils"))]
/// Mock providers for tests.
pub mod test_utils;
