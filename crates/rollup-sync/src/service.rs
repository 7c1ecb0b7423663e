use crate::{RollupEventSyncer, RollupSyncConfig, RollupSyncError, RollupSyncHandle};

use rollup_node_providers::{L1RollupProvider, L2BlockProvider};
use scroll_db::DatabaseOperations;

/// The rollup sync service, enabled only when an L1 provider is available.
#[derive(Debug)]
pub enum RollupSyncService<L1, L2, DB> {
    /// No L1 provider was given, the service does not run.
    Disabled,
    /// The service syncs the rollup events of the L1.
    Enabled(RollupEventSyncer<L1, L2, DB>),
}

impl<L1, L2, DB> RollupSyncService<L1, L2, DB>
where
    L1: L1RollupProvider + 'static,
    L2: L2BlockProvider + 'static,
    DB: DatabaseOperations + Send + Sync + 'static,
{
    /// Returns a new [`RollupSyncService`], disabled if no L1 provider is given.
    pub async fn new(
        config: RollupSyncConfig,
        l1_provider: Option<L1>,
        l2_provider: L2,
        database: DB,
    ) -> Result<Self, RollupSyncError> {
        let Some(l1_provider) = l1_provider else {
            tracing::warn!(target: "scroll::rollup_sync", "no L1 provider given, rollup sync service will not run");
            return Ok(Self::Disabled)
        };

        let syncer = RollupEventSyncer::new(config, l1_provider, l2_provider, database).await?;
        Ok(Self::Enabled(syncer))
    }

    /// Returns true if the service is enabled.
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Spawns the sync task and returns its [`RollupSyncHandle`].
    pub fn start(self) -> RollupSyncHandle {
        match self {
            Self::Disabled => RollupSyncHandle::disabled(),
            Self::Enabled(syncer) => {
                let cancellation = syncer.cancellation_token();
                let status = syncer.subscribe();
                let task = tokio::spawn(syncer.run());
                RollupSyncHandle::new(cancellation, status, task)
            }
        }
    }
}
