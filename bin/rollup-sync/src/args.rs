use alloy_chains::NamedChain;
use alloy_primitives::Address;
use rollup_node_primitives::NodeConfig;
use rollup_node_rollup_sync::{RollupSyncConfig, DEFAULT_FETCH_BLOCK_RANGE};
use std::{path::PathBuf, time::Duration};

/// The max retries for the L1 provider.
const L1_PROVIDER_MAX_RETRIES: u32 = 10;

/// The initial backoff in milliseconds for the L1 provider.
const L1_PROVIDER_INITIAL_BACKOFF: u64 = 100;

/// The max retries for the L2 provider.
pub(crate) const L2_PROVIDER_MAX_RETRIES: u32 = 10;

/// The initial backoff in milliseconds for the L2 provider.
pub(crate) const L2_PROVIDER_INITIAL_BACKOFF: u64 = 100;

/// The default provider compute units per second.
pub(crate) const PROVIDER_COMPUTE_UNITS_PER_SECOND: u64 = 10000;

/// The default interval in seconds between two sync passes.
const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// The command line arguments of the rollup sync binary.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "rollup-sync", about = "Syncs and validates the Scroll rollup events of the L1")]
pub(crate) struct Args {
    /// The Scroll network to follow.
    #[arg(long, value_name = "CHAIN", env = "ROLLUP_SYNC_CHAIN", default_value = "scroll")]
    pub chain: NamedChain,
    /// The L1 provider arguments.
    #[command(flatten)]
    pub l1_provider_args: L1ProviderArgs,
    /// The L2 provider arguments.
    #[command(flatten)]
    pub l2_provider_args: L2ProviderArgs,
    /// The database arguments.
    #[command(flatten)]
    pub database_args: DatabaseArgs,
    /// The rollup sync arguments.
    #[command(flatten)]
    pub sync_args: SyncArgs,
}

impl Args {
    /// Returns the [`NodeConfig`] for the selected chain with the command line overrides applied.
    pub(crate) fn node_config(&self) -> eyre::Result<NodeConfig> {
        let mut config = NodeConfig::from_named_chain(self.chain)
            .ok_or_else(|| eyre::eyre!("unsupported chain: {}", self.chain))?;
        if let Some(address) = self.sync_args.rollup_address {
            config.scroll_chain_address = address;
        }
        if let Some(block) = self.sync_args.deployment_block {
            config.l1_deployment_block = block;
        }
        Ok(config)
    }

    /// Returns the [`RollupSyncConfig`] derived from the arguments.
    pub(crate) fn sync_config(&self, node_config: &NodeConfig) -> RollupSyncConfig {
        RollupSyncConfig::from(node_config)
            .with_fetch_block_range(self.sync_args.fetch_block_range)
            .with_poll_interval(Duration::from_secs(self.sync_args.poll_interval))
    }

    /// Returns the sqlite url of the database.
    pub(crate) fn database_url(&self) -> String {
        // append the path using strings as using `join(...)` overwrites "sqlite://"
        // if the path is absolute.
        let path = self.database_args.path.join("rollup-sync.db?mode=rwc");
        "sqlite://".to_string() + &*path.to_string_lossy()
    }
}

/// The arguments for the L1 provider.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct L1ProviderArgs {
    /// The URL for the L1 RPC. The service is disabled when omitted.
    #[arg(long = "l1.url", id = "l1_url", value_name = "L1_URL", env = "ROLLUP_SYNC_L1_URL")]
    pub url: Option<reqwest::Url>,
    /// The compute units per second for the provider.
    #[arg(long = "l1.cups", id = "l1_compute_units_per_second", value_name = "L1_COMPUTE_UNITS_PER_SECOND", default_value_t = PROVIDER_COMPUTE_UNITS_PER_SECOND)]
    pub compute_units_per_second: u64,
    /// The max amount of retries for the provider.
    #[arg(long = "l1.max-retries", id = "l1_max_retries", value_name = "L1_MAX_RETRIES", default_value_t = L1_PROVIDER_MAX_RETRIES)]
    pub max_retries: u32,
    /// The initial backoff for the provider.
    #[arg(long = "l1.initial-backoff", id = "l1_initial_backoff", value_name = "L1_INITIAL_BACKOFF", default_value_t = L1_PROVIDER_INITIAL_BACKOFF)]
    pub initial_backoff: u64,
}

/// The arguments for the L2 provider.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct L2ProviderArgs {
    /// The URL for the L2 RPC.
    #[arg(
        long = "l2.url",
        id = "l2_url",
        value_name = "L2_URL",
        env = "ROLLUP_SYNC_L2_URL",
        default_value = "http://localhost:8545"
    )]
    pub url: reqwest::Url,
}

/// The database arguments.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DatabaseArgs {
    /// The directory holding the rollup sync database.
    #[arg(long = "db.path", id = "db_path", value_name = "DB_PATH", env = "ROLLUP_SYNC_DB_PATH", default_value = ".")]
    pub path: PathBuf,
}

/// The rollup sync arguments.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SyncArgs {
    /// The maximum count of L1 blocks queried for rollup events at once.
    #[arg(long = "sync.fetch-block-range", id = "sync_fetch_block_range", value_name = "SYNC_FETCH_BLOCK_RANGE", default_value_t = DEFAULT_FETCH_BLOCK_RANGE)]
    pub fetch_block_range: u64,
    /// The interval in seconds between two sync passes.
    #[arg(long = "sync.poll-interval", id = "sync_poll_interval", value_name = "SYNC_POLL_INTERVAL", default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    pub poll_interval: u64,
    /// Overrides the address of the rollup contract.
    #[arg(long = "rollup.address", id = "rollup_address", value_name = "ROLLUP_ADDRESS")]
    pub rollup_address: Option<Address>,
    /// Overrides the L1 block the rollup contract was deployed at.
    #[arg(long = "rollup.deployment-block", id = "rollup_deployment_block", value_name = "ROLLUP_DEPLOYMENT_BLOCK")]
    pub deployment_block: Option<u64>,
}
