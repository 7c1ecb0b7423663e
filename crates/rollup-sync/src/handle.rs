use crate::RollupSyncError;

use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// A snapshot of the progress of the rollup sync service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RollupSyncStatus {
    /// The last L1 block whose rollup events were applied.
    pub latest_processed_l1_block: u64,
    /// The index of the latest finalized batch validated against the local chain.
    pub latest_finalized_batch_index: Option<u64>,
    /// The last L2 block of the latest validated batch.
    pub finalized_l2_block_number: Option<u64>,
}

/// Handle to a started rollup sync service.
#[derive(Debug)]
pub struct RollupSyncHandle {
    cancellation: CancellationToken,
    status: watch::Receiver<RollupSyncStatus>,
    task: Option<JoinHandle<Result<(), RollupSyncError>>>,
}

impl RollupSyncHandle {
    /// Returns a new [`RollupSyncHandle`] for the running sync task.
    pub(crate) const fn new(
        cancellation: CancellationToken,
        status: watch::Receiver<RollupSyncStatus>,
        task: JoinHandle<Result<(), RollupSyncError>>,
    ) -> Self {
        Self { cancellation, status, task: Some(task) }
    }

    /// Returns a handle for a disabled service, which only waits for the stop signal.
    pub(crate) fn disabled() -> Self {
        let (_, status) = watch::channel(RollupSyncStatus::default());
        Self { cancellation: CancellationToken::new(), status, task: None }
    }

    /// Requests the service to stop. Calling it more than once has no further effect.
    pub fn stop(&self) {
        self.cancellation.cancel();
    }

    /// Returns the token cancelling the service, usable once the handle is consumed by
    /// [`RollupSyncHandle::wait`].
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Returns the latest published [`RollupSyncStatus`].
    pub fn status(&self) -> RollupSyncStatus {
        *self.status.borrow()
    }

    /// Returns a receiver notified on every status update.
    pub fn status_receiver(&self) -> watch::Receiver<RollupSyncStatus> {
        self.status.clone()
    }

    /// Waits for the service to terminate.
    ///
    /// Resolves to a [`RollupSyncError::Consistency`] error if the service halted on a consistency
    /// fault.
    pub async fn wait(self) -> Result<(), RollupSyncError> {
        match self.task {
            Some(task) => task.await?,
            None => {
                self.cancellation.cancelled().await;
                Ok(())
            }
        }
    }
}
