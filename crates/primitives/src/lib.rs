//! Primitive types for the Scroll rollup sync service.

pub use batch::{ChunkBlockRange, FinalizedBatchMeta};
mod batch;

pub use block::{L2BlockData, L2TransactionData, WrappedBlock};
mod block;

pub use chunk::Chunk;
mod chunk;

pub use node::config::{
    NodeConfig, DEVNET_ROLLUP_CONTRACT_ADDRESS, DEV_L1_CHAIN_ID, DEV_L1_DEPLOYMENT_BLOCK_NUMBER,
    L2_MESSAGE_QUEUE_ADDRESS, MAINNET_L1_CHAIN_ID, MAINNET_L1_DEPLOYMENT_BLOCK_NUMBER,
    MAINNET_ROLLUP_CONTRACT_ADDRESS, SEPOLIA_L1_CHAIN_ID, SEPOLIA_L1_DEPLOYMENT_BLOCK_NUMBER,
    SEPOLIA_ROLLUP_CONTRACT_ADDRESS,
};
mod node;
