use crate::{
    reconstruct::reconstruct_batch,
    validate::{validate_batch, FinalizedBatch},
    RollupSyncConfig, RollupSyncError, RollupSyncMetrics, RollupSyncStatus,
};

use alloy_rpc_types_eth::Log;
use rollup_node_primitives::ChunkBlockRange;
use rollup_node_providers::{L1RollupProvider, L2BlockProvider};
use scroll_codec::decode_chunk_ranges;
use scroll_db::{DatabaseError, DatabaseOperations};
use scroll_l1::RollupEvent;
use tokio::{
    sync::watch,
    time::{interval, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

/// The rollup event syncer applies the rollup events of the L1 to the local checkpoint store,
/// validating every finalized batch against the local L2 chain.
///
/// The syncer is the single writer of the store. It processes the L1 in windows of at most
/// [`RollupSyncConfig::fetch_block_range`] blocks and only advances its cursor once all the logs of
/// a window were applied, so a window interrupted at any point can be applied again.
#[derive(Debug)]
pub struct RollupEventSyncer<L1, L2, DB> {
    /// The L1 rollup contract provider.
    l1_provider: L1,
    /// The local L2 chain provider.
    l2_provider: L2,
    /// The checkpoint store.
    database: DB,
    /// The configuration of the service.
    config: RollupSyncConfig,
    /// The last L1 block whose rollup events were applied.
    latest_processed_block: u64,
    /// The published status of the syncer.
    status: watch::Sender<RollupSyncStatus>,
    /// The stop signal of the syncer.
    cancellation: CancellationToken,
    /// The metrics of the syncer.
    metrics: RollupSyncMetrics,
}

impl<L1, L2, DB> RollupEventSyncer<L1, L2, DB>
where
    L1: L1RollupProvider,
    L2: L2BlockProvider,
    DB: DatabaseOperations + Send + Sync,
{
    /// Returns a new [`RollupEventSyncer`], resuming from the cursor persisted in the database.
    pub async fn new(
        config: RollupSyncConfig,
        l1_provider: L1,
        l2_provider: L2,
        database: DB,
    ) -> Result<Self, DatabaseError> {
        let latest_processed_block = database
            .get_rollup_event_synced_l1_block_number()
            .await?
            .unwrap_or_else(|| config.initial_processed_block());
        let status = RollupSyncStatus {
            latest_processed_l1_block: latest_processed_block,
            latest_finalized_batch_index: database.get_latest_finalized_batch_index().await?,
            finalized_l2_block_number: database.get_finalized_l2_block_number().await?,
        };

        let metrics = RollupSyncMetrics::default();
        metrics.latest_processed_l1_block.set(latest_processed_block as f64);

        Ok(Self {
            l1_provider,
            l2_provider,
            database,
            config,
            latest_processed_block,
            status: watch::Sender::new(status),
            cancellation: CancellationToken::new(),
            metrics,
        })
    }

    /// Returns the last L1 block whose rollup events were applied.
    pub const fn latest_processed_block(&self) -> u64 {
        self.latest_processed_block
    }

    /// Returns the current [`RollupSyncStatus`].
    pub fn status(&self) -> RollupSyncStatus {
        *self.status.borrow()
    }

    /// Returns a receiver notified on every status update.
    pub fn subscribe(&self) -> watch::Receiver<RollupSyncStatus> {
        self.status.subscribe()
    }

    /// Returns the token stopping the syncer when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Runs the syncer until it is cancelled or halts on a consistency fault.
    ///
    /// Every other error is logged and the pass is retried at the next tick.
    pub async fn run(mut self) -> Result<(), RollupSyncError> {
        tracing::info!(target: "scroll::rollup_sync", latest_processed_block = self.latest_processed_block, "starting rollup event sync");

        let cancellation = self.cancellation.clone();
        let mut poll_interval = interval(self.config.poll_interval);
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                _ = poll_interval.tick() => {
                    let result = tokio::select! {
                        biased;
                        _ = cancellation.cancelled() => break,
                        result = self.sync() => result,
                    };

                    match result {
                        Ok(()) => {}
                        Err(err) if err.is_fatal() => {
                            tracing::error!(target: "scroll::rollup_sync", ?err, "consistency fault, halting rollup event sync");
                            return Err(err)
                        }
                        Err(err) if err.is_transient() => {
                            tracing::warn!(target: "scroll::rollup_sync", ?err, "rollup event sync pass failed, retrying at next tick");
                        }
                        Err(err) => {
                            tracing::error!(target: "scroll::rollup_sync", ?err, "failed to apply rollup events, retrying at next tick");
                        }
                    }
                }
            }
        }

        tracing::info!(target: "scroll::rollup_sync", latest_processed_block = self.latest_processed_block, "stopped rollup event sync");
        Ok(())
    }

    /// Runs a sync pass, applying the rollup events of every window between the cursor and the
    /// latest finalized L1 block.
    ///
    /// The pass stops at the first failing window, leaving the cursor at the end of the last
    /// applied window.
    pub async fn sync(&mut self) -> Result<(), RollupSyncError> {
        let latest_finalized = self
            .l1_provider
            .latest_finalized_block_number()
            .await
            .inspect_err(|_| self.metrics.fetch_failures.increment(1))?;

        tracing::trace!(target: "scroll::rollup_sync", latest_processed_block = self.latest_processed_block, latest_finalized, "sync pass");

        let range = self.config.fetch_block_range.max(1);
        while self.latest_processed_block < latest_finalized {
            if self.cancellation.is_cancelled() {
                break
            }

            let from = self.latest_processed_block + 1;
            let to = from.saturating_add(range - 1).min(latest_finalized);

            let logs = self
                .l1_provider
                .rollup_event_logs(from, to)
                .await
                .inspect_err(|_| self.metrics.fetch_failures.increment(1))?;
            tracing::trace!(target: "scroll::rollup_sync", from, to, logs = logs.len(), "fetched rollup event logs");

            self.apply_logs(logs, to)
                .await
                .inspect_err(|_| self.metrics.processing_failures.increment(1))?;
        }

        Ok(())
    }

    /// Applies the logs of the window ending at `to` in L1 order, then advances the cursor to `to`.
    async fn apply_logs(&mut self, mut logs: Vec<Log>, to: u64) -> Result<(), RollupSyncError> {
        logs.sort_by_key(|log| (log.block_number, log.log_index));
        for log in &logs {
            self.apply_log(log).await?;
        }

        // writes above can be repeated, a crash before this point replays the window.
        self.database.set_rollup_event_synced_l1_block_number(to).await?;
        self.latest_processed_block = to;
        self.metrics.latest_processed_l1_block.set(to as f64);
        self.status.send_modify(|status| status.latest_processed_l1_block = to);

        tracing::info!(target: "scroll::rollup_sync", to, "advanced rollup event cursor");
        Ok(())
    }

    async fn apply_log(&mut self, log: &Log) -> Result<(), RollupSyncError> {
        let event = RollupEvent::try_decode(&log.inner)?;
        match event {
            RollupEvent::Commit { batch_index, batch_hash } => {
                let ranges = self.chunk_ranges(batch_index, log).await?;
                tracing::debug!(target: "scroll::rollup_sync", batch_index, ?batch_hash, ?ranges, "applying batch commit");
                self.database.insert_batch_chunk_ranges(batch_index, ranges).await?;
                self.metrics.batch_commits.increment(1);
            }
            RollupEvent::Revert { batch_index, batch_hash } => {
                tracing::debug!(target: "scroll::rollup_sync", batch_index, ?batch_hash, "applying batch revert");
                self.database.delete_batch_chunk_ranges(batch_index).await?;
                self.metrics.batch_reverts.increment(1);
            }
            RollupEvent::Finalize { batch_index, batch_hash, state_root, withdraw_root } => {
                let finalized =
                    FinalizedBatch { batch_index, batch_hash, state_root, withdraw_root };
                let batch =
                    reconstruct_batch(&self.l2_provider, &self.database, batch_index).await?;
                let (meta, last_block_number) = validate_batch(&finalized, &batch)?;

                tracing::debug!(target: "scroll::rollup_sync", batch_index, ?meta, last_block_number, "applying batch finalization");
                self.database.set_finalized_l2_block_number(last_block_number).await?;
                self.database.insert_finalized_batch_meta(batch_index, meta).await?;
                self.metrics.batch_finalizations.increment(1);
                self.status.send_modify(|status| {
                    status.latest_finalized_batch_index =
                        status.latest_finalized_batch_index.max(Some(batch_index));
                    status.finalized_l2_block_number = Some(last_block_number);
                });
            }
        }
        Ok(())
    }

    /// Returns the chunk ranges committed by the commit log of the batch.
    async fn chunk_ranges(
        &self,
        batch_index: u64,
        log: &Log,
    ) -> Result<Vec<ChunkBlockRange>, RollupSyncError> {
        if batch_index == 0 {
            return Ok(vec![ChunkBlockRange::genesis()])
        }

        let tx_hash =
            log.transaction_hash.ok_or(RollupSyncError::MissingTransactionHash(batch_index))?;
        let input = self.l1_provider.transaction_input(tx_hash).await?;
        Ok(decode_chunk_ranges(&input)?)
    }
}
