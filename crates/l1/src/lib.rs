//! Bindings and event decoding for the Scroll rollup contract deployed on L1.

/// ABI bindings of the rollup contract.
pub mod abi;

pub use event::{RollupEvent, RollupEventError};
mod event;
