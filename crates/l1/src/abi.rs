/// Calls to the rollup contract.
pub mod calls;

/// Events emitted by the rollup contract.
pub mod logs;
