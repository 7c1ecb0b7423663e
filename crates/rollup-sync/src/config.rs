use alloy_primitives::Address;
use rollup_node_primitives::NodeConfig;
use std::time::Duration;

/// The default count of L1 blocks queried for rollup events at once.
pub const DEFAULT_FETCH_BLOCK_RANGE: u64 = 100;

/// The default interval between two sync passes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// The configuration of the rollup sync service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollupSyncConfig {
    /// The address of the rollup contract on the L1.
    pub scroll_chain_address: Address,
    /// The L1 block the rollup contract was deployed at.
    pub l1_deployment_block: u64,
    /// The maximum count of L1 blocks queried for logs at once.
    pub fetch_block_range: u64,
    /// The interval between two sync passes.
    pub poll_interval: Duration,
}

impl RollupSyncConfig {
    /// Returns a new [`RollupSyncConfig`] with the default fetch range and poll interval.
    pub const fn new(scroll_chain_address: Address, l1_deployment_block: u64) -> Self {
        Self {
            scroll_chain_address,
            l1_deployment_block,
            fetch_block_range: DEFAULT_FETCH_BLOCK_RANGE,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the maximum count of L1 blocks queried for logs at once.
    pub const fn with_fetch_block_range(mut self, fetch_block_range: u64) -> Self {
        self.fetch_block_range = fetch_block_range;
        self
    }

    /// Sets the interval between two sync passes.
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns the L1 block the service resumes from when no progress was persisted.
    pub const fn initial_processed_block(&self) -> u64 {
        self.l1_deployment_block.saturating_sub(1)
    }
}

impl From<&NodeConfig> for RollupSyncConfig {
    fn from(config: &NodeConfig) -> Self {
        Self::new(config.scroll_chain_address, config.l1_deployment_block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_resume_before_deployment_block() {
        let config = RollupSyncConfig::from(&NodeConfig::mainnet());
        assert_eq!(config.initial_processed_block(), config.l1_deployment_block - 1);
        assert_eq!(config.fetch_block_range, DEFAULT_FETCH_BLOCK_RANGE);
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);

        let config = RollupSyncConfig::new(Address::ZERO, 0);
        assert_eq!(config.initial_processed_block(), 0);
    }
}
