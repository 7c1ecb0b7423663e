//! Binary running the Scroll rollup sync service against an L1 and an L2 node.

use crate::args::{
    Args, L1ProviderArgs, L2_PROVIDER_INITIAL_BACKOFF, L2_PROVIDER_MAX_RETRIES,
    PROVIDER_COMPUTE_UNITS_PER_SECOND,
};

use alloy_provider::ProviderBuilder;
use alloy_rpc_client::RpcClient;
use alloy_transport::layers::RetryBackoffLayer;
use clap::Parser;
use rollup_node_providers::{OnlineL1RollupProvider, OnlineL2BlockProvider};
use rollup_node_rollup_sync::RollupSyncService;
use scroll_alloy_network::Scroll;
use scroll_db::{Database, DatabaseConnectionProvider};
use scroll_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(tracing_subscriber::fmt::layer()).with(filter).init();

    let args = Args::parse();
    let node_config = args.node_config()?;
    let sync_config = args.sync_config(&node_config);

    // Open the database and apply the pending migrations.
    let database = Database::new(&args.database_url()).await?;
    scroll_migration::Migrator::up(database.get_connection(), None).await?;

    // Get a provider
    let l1_provider = match args.l1_provider_args.url.clone() {
        Some(url) => {
            let L1ProviderArgs { max_retries, initial_backoff, compute_units_per_second, .. } =
                args.l1_provider_args;
            let client = RpcClient::builder()
                .layer(RetryBackoffLayer::new(
                    max_retries,
                    initial_backoff,
                    compute_units_per_second,
                ))
                .http(url);
            let provider = ProviderBuilder::new().connect_client(client);
            Some(
                OnlineL1RollupProvider::new_with_chain_id(
                    provider,
                    node_config.scroll_chain_address,
                    node_config.l1_chain_id,
                )
                .await?,
            )
        }
        None => None,
    };

    // Init a retry provider to the execution layer.
    let retry_layer = RetryBackoffLayer::new(
        L2_PROVIDER_MAX_RETRIES,
        L2_PROVIDER_INITIAL_BACKOFF,
        PROVIDER_COMPUTE_UNITS_PER_SECOND,
    );
    let client = RpcClient::builder().layer(retry_layer).http(args.l2_provider_args.url.clone());
    let l2_provider = OnlineL2BlockProvider::new(
        ProviderBuilder::<_, _, Scroll>::default().connect_client(client),
    );

    let service = RollupSyncService::new(sync_config, l1_provider, l2_provider, database).await?;
    tracing::info!(
        target: "scroll::rollup_sync::bin",
        chain = %args.chain,
        enabled = service.is_enabled(),
        address = %sync_config.scroll_chain_address,
        "starting rollup sync service"
    );

    let handle = service.start();
    let mut status = handle.status_receiver();
    let cancellation = handle.cancellation_token();
    let wait = handle.wait();
    tokio::pin!(wait);

    loop {
        tokio::select! {
            res = &mut wait => {
                if let Err(err) = res {
                    tracing::error!(target: "scroll::rollup_sync::bin", %err, "rollup sync service halted");
                    std::process::exit(1);
                }
                return Ok(())
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(target: "scroll::rollup_sync::bin", "received shutdown signal");
                cancellation.cancel();
            }
            Ok(()) = status.changed() => {
                let current = *status.borrow_and_update();
                tracing::debug!(target: "scroll::rollup_sync::bin", ?current, "rollup sync status updated");
            }
        }
    }
}
