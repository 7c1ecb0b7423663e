use metrics::{Counter, Gauge};
use metrics_derive::Metrics;

/// The metrics for the [`super::RollupEventSyncer`].
#[derive(Metrics)]
#[metrics(scope = "rollup_sync")]
pub struct RollupSyncMetrics {
    /// A counter on the batch commits applied.
    pub batch_commits: Counter,
    /// A counter on the batch reverts applied.
    pub batch_reverts: Counter,
    /// A counter on the batch finalizations validated and applied.
    pub batch_finalizations: Counter,
    /// A counter on the failed L1 queries.
    pub fetch_failures: Counter,
    /// A counter on the windows whose logs failed to apply.
    pub processing_failures: Counter,
    /// The last L1 block whose rollup events were applied.
    pub latest_processed_l1_block: Gauge,
}
