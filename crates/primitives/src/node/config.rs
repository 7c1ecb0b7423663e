use alloy_chains::NamedChain;
use alloy_primitives::{address, Address};

/// The address of the Scroll Rollup contract on Mainnet.
pub const MAINNET_ROLLUP_CONTRACT_ADDRESS: Address =
    address!("0xa13BAF47339d63B743e7Da8741db5456DAc1E556");

/// The address of the Scroll Rollup contract on Sepolia.
pub const SEPOLIA_ROLLUP_CONTRACT_ADDRESS: Address =
    address!("0x2D567EcE699Eabe5afCd141eDB7A4f2D0D6ce8a0");

/// The address of the Scroll Rollup contract on Devnet.
pub const DEVNET_ROLLUP_CONTRACT_ADDRESS: Address =
    address!("0x5FC8d32690cc91D4c39d9d3abcBD16989F875707");

/// The L1 block at which the rollup contract was deployed on Mainnet.
pub const MAINNET_L1_DEPLOYMENT_BLOCK_NUMBER: u64 = 18306000;

/// The L1 block at which the rollup contract was deployed on Sepolia.
pub const SEPOLIA_L1_DEPLOYMENT_BLOCK_NUMBER: u64 = 4038000;

/// The L1 block at which the rollup contract was deployed on Devnet.
pub const DEV_L1_DEPLOYMENT_BLOCK_NUMBER: u64 = 0;

/// The chain id of the L1 backing Mainnet.
pub const MAINNET_L1_CHAIN_ID: u64 = 1;

/// The chain id of the L1 backing Sepolia.
pub const SEPOLIA_L1_CHAIN_ID: u64 = 11155111;

/// The chain id of the L1 backing Devnet.
pub const DEV_L1_CHAIN_ID: u64 = 31337;

/// The address of the L2 message queue predeploy holding the withdraw trie root.
pub const L2_MESSAGE_QUEUE_ADDRESS: Address =
    address!("0x5300000000000000000000000000000000000000");

/// A shared configuration for the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    /// The address of the rollup contract on L1.
    pub scroll_chain_address: Address,
    /// The L1 block at which the rollup contract was deployed.
    pub l1_deployment_block: u64,
    /// The chain id of the L1.
    pub l1_chain_id: u64,
}

impl NodeConfig {
    /// Returns the node configuration for Mainnet.
    pub const fn mainnet() -> Self {
        Self {
            scroll_chain_address: MAINNET_ROLLUP_CONTRACT_ADDRESS,
            l1_deployment_block: MAINNET_L1_DEPLOYMENT_BLOCK_NUMBER,
            l1_chain_id: MAINNET_L1_CHAIN_ID,
        }
    }

    /// Returns the node configuration for Sepolia.
    pub const fn sepolia() -> Self {
        Self {
            scroll_chain_address: SEPOLIA_ROLLUP_CONTRACT_ADDRESS,
            l1_deployment_block: SEPOLIA_L1_DEPLOYMENT_BLOCK_NUMBER,
            l1_chain_id: SEPOLIA_L1_CHAIN_ID,
        }
    }

    /// Returns the node configuration for Devnet.
    pub const fn dev() -> Self {
        Self {
            scroll_chain_address: DEVNET_ROLLUP_CONTRACT_ADDRESS,
            l1_deployment_block: DEV_L1_DEPLOYMENT_BLOCK_NUMBER,
            l1_chain_id: DEV_L1_CHAIN_ID,
        }
    }

    /// Returns the node configuration from a [`NamedChain`], or [`None`] if the chain is not a
    /// Scroll network.
    pub const fn from_named_chain(chain: NamedChain) -> Option<Self> {
        match chain {
            NamedChain::Scroll => Some(Self::mainnet()),
            NamedChain::ScrollSepolia => Some(Self::sepolia()),
            NamedChain::Dev => Some(Self::dev()),
            _ => None,
        }
    }
}
