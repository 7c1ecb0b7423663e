use crate::{L1ProviderError, L1RollupProvider, L2BlockProvider, L2ProviderError};
use std::{collections::HashMap, sync::Mutex};

use alloy_primitives::{Bytes, B256};
use alloy_rpc_types_eth::Log;
use alloy_transport::TransportErrorKind;
use rollup_node_primitives::L2BlockData;

/// Implementation of the [`L1RollupProvider`] serving a fixed set of logs and transactions.
#[derive(Debug, Default)]
pub struct MockL1RollupProvider {
    /// The latest finalized L1 block number.
    pub finalized_block_number: u64,
    /// The rollup event logs.
    pub logs: Vec<Log>,
    /// The transaction inputs by hash.
    pub transactions: HashMap<B256, Bytes>,
    /// Whether log queries fail with a transport error.
    pub fail_log_queries: bool,
    /// The ranges of the received log queries.
    pub log_queries: Mutex<Vec<(u64, u64)>>,
}

impl MockL1RollupProvider {
    /// Returns a new [`MockL1RollupProvider`] finalized at the provided block.
    pub fn new(finalized_block_number: u64) -> Self {
        Self { finalized_block_number, ..Default::default() }
    }

    /// Adds a log to the provider.
    pub fn with_log(mut self, log: Log) -> Self {
        self.logs.push(log);
        self
    }

    /// Adds a transaction input to the provider.
    pub fn with_transaction(mut self, hash: B256, input: Bytes) -> Self {
        self.transactions.insert(hash, input);
        self
    }

    /// Returns the ranges of the log queries received so far.
    pub fn log_queries(&self) -> Vec<(u64, u64)> {
        self.log_queries.lock().map(|queries| queries.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl L1RollupProvider for MockL1RollupProvider {
    async fn latest_finalized_block_number(&self) -> Result<u64, L1ProviderError> {
        Ok(self.finalized_block_number)
    }

    async fn rollup_event_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, L1ProviderError> {
        if let Ok(mut queries) = self.log_queries.lock() {
            queries.push((from, to));
        }
        if self.fail_log_queries {
            return Err(TransportErrorKind::custom_str("mock log query failure").into())
        }
        Ok(self
            .logs
            .iter()
            .filter(|log| log.block_number.is_some_and(|number| (from..=to).contains(&number)))
            .cloned()
            .collect())
    }

    async fn transaction_input(&self, hash: B256) -> Result<Bytes, L1ProviderError> {
        self.transactions.get(&hash).cloned().ok_or(L1ProviderError::MissingTransaction(hash))
    }
}

/// Implementation of the [`L2BlockProvider`] serving a fixed set of blocks.
#[derive(Debug, Default, Clone)]
pub struct MockL2BlockProvider {
    /// The blocks by number.
    pub blocks: HashMap<u64, L2BlockData>,
    /// The withdraw roots by block hash.
    pub withdraw_roots: HashMap<B256, B256>,
}

impl MockL2BlockProvider {
    /// Adds a block along with its withdraw root to the provider.
    pub fn with_block(mut self, block: L2BlockData, withdraw_root: B256) -> Self {
        self.withdraw_roots.insert(block.hash, withdraw_root);
        self.blocks.insert(block.header.number, block);
        self
    }
}

#[async_trait::async_trait]
impl L2BlockProvider for MockL2BlockProvider {
    async fn block_by_number(&self, number: u64) -> Result<Option<L2BlockData>, L2ProviderError> {
        Ok(self.blocks.get(&number).cloned())
    }

    async fn withdraw_root(&self, block_hash: B256) -> Result<B256, L2ProviderError> {
        Ok(self.withdraw_roots.get(&block_hash).copied().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_consensus::Header;

    fn log_at(block_number: u64) -> Log {
        Log { block_number: Some(block_number), ..Default::default() }
    }

    #[tokio::test]
    async fn test_should_filter_logs_by_range() -> eyre::Result<()> {
        // Given
        let provider = MockL1RollupProvider::new(10)
            .with_log(log_at(1))
            .with_log(log_at(5))
            .with_log(log_at(9));

        // When
        let logs = provider.rollup_event_logs(2, 9).await?;

        // Then
        assert_eq!(logs.len(), 2);
        assert_eq!(provider.log_queries(), vec![(2, 9)]);

        Ok(())
    }

    #[tokio::test]
    async fn test_should_fail_log_queries() {
        let provider = MockL1RollupProvider { fail_log_queries: true, ..Default::default() };
        assert!(matches!(provider.rollup_event_logs(0, 1).await, Err(L1ProviderError::Rpc(_))));
        assert!(matches!(
            provider.transaction_input(B256::ZERO).await,
            Err(L1ProviderError::MissingTransaction(_))
        ));
    }

    #[tokio::test]
    async fn test_should_serve_blocks_and_withdraw_roots() -> eyre::Result<()> {
        // Given
        let block = L2BlockData {
            hash: B256::with_last_byte(1),
            header: Header { number: 3, ..Default::default() },
            transactions: vec![],
        };
        let provider =
            MockL2BlockProvider::default().with_block(block.clone(), B256::repeat_byte(2));

        // Then
        assert_eq!(provider.block_by_number(3).await?, Some(block));
        assert_eq!(provider.block_by_number(4).await?, None);
        assert_eq!(provider.withdraw_root(B256::with_last_byte(1)).await?, B256::repeat_byte(2));

        Ok(())
    }
}
