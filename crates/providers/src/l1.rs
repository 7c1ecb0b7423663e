use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, Bytes, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Filter, Log, TransactionTrait};
use alloy_transport::{RpcError, TransportErrorKind};
use scroll_l1::abi::logs::ROLLUP_EVENT_SIGNATURES;

/// An error occurring at the [`L1RollupProvider`].
#[derive(Debug, thiserror::Error)]
pub enum L1ProviderError {
    /// L1 RPC error.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
    /// The L1 node serves a different chain than expected.
    #[error("unexpected L1 chain id: expected {expected}, got {got}")]
    UnexpectedChainId {
        /// The expected chain id.
        expected: u64,
        /// The chain id reported by the node.
        got: u64,
    },
    /// The L1 node did not return a finalized block.
    #[error("missing finalized L1 block")]
    MissingFinalizedBlock,
    /// The requested transaction does not exist.
    #[error("unknown L1 transaction {0}")]
    MissingTransaction(B256),
}

/// Implementers of the trait give access to the rollup contract state of the L1.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait L1RollupProvider: Send + Sync {
    /// Returns the number of the latest finalized L1 block.
    async fn latest_finalized_block_number(&self) -> Result<u64, L1ProviderError>;

    /// Returns the rollup event logs emitted by the rollup contract in the inclusive range of L1
    /// blocks `[from, to]`.
    async fn rollup_event_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, L1ProviderError>;

    /// Returns the input of the L1 transaction with the provided hash.
    async fn transaction_input(&self, hash: B256) -> Result<Bytes, L1ProviderError>;
}

/// An implementation of the [`L1RollupProvider`] backed by an alloy [`Provider`].
///
/// The provider should implement some backoff strategy using
/// [`alloy_transport::layers::RetryBackoffLayer`] in order to avoid excessive queries on the RPC
/// provider.
#[derive(Debug, Clone)]
pub struct OnlineL1RollupProvider<P> {
    /// The L1 execution node provider.
    provider: P,
    /// The filter selecting the rollup events of the rollup contract.
    filter: Filter,
}

impl<P: Provider> OnlineL1RollupProvider<P> {
    /// Returns a new [`OnlineL1RollupProvider`] for the rollup contract at the provided address.
    pub fn new(provider: P, scroll_chain_address: Address) -> Self {
        let filter = Filter::new()
            .address(scroll_chain_address)
            .event_signature(ROLLUP_EVENT_SIGNATURES.to_vec());
        Self { provider, filter }
    }

    /// Returns a new [`OnlineL1RollupProvider`] after checking the L1 node serves the chain with
    /// the expected id.
    pub async fn new_with_chain_id(
        provider: P,
        scroll_chain_address: Address,
        expected_chain_id: u64,
    ) -> Result<Self, L1ProviderError> {
        let got = provider.get_chain_id().await?;
        if got != expected_chain_id {
            return Err(L1ProviderError::UnexpectedChainId { expected: expected_chain_id, got })
        }
        Ok(Self::new(provider, scroll_chain_address))
    }
}

#[async_trait::async_trait]
impl<P: Provider> L1RollupProvider for OnlineL1RollupProvider<P> {
    async fn latest_finalized_block_number(&self) -> Result<u64, L1ProviderError> {
        let block = self
            .provider
            .get_block(BlockNumberOrTag::Finalized.into())
            .await?
            .ok_or(L1ProviderError::MissingFinalizedBlock)?;
        Ok(block.header.number)
    }

    async fn rollup_event_logs(&self, from: u64, to: u64) -> Result<Vec<Log>, L1ProviderError> {
        tracing::trace!(target: "scroll::providers", from, to, "fetching rollup event logs");
        let filter = self.filter.clone().from_block(from).to_block(to);
        Ok(self.provider.get_logs(&filter).await?)
    }

    async fn transaction_input(&self, hash: B256) -> Result<Bytes, L1ProviderError> {
        let transaction = self
            .provider
            .get_transaction_by_hash(hash)
            .await?
            .ok_or(L1ProviderError::MissingTransaction(hash))?;
        Ok(transaction.input().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloy_provider::ProviderBuilder;
    use alloy_transport::mock::Asserter;

    const ROLLUP_ADDRESS: Address = Address::repeat_byte(0x11);

    #[tokio::test]
    async fn test_should_reject_unexpected_chain_id() {
        // Given
        let asserter = Asserter::new();
        asserter.push_success(&"0xaa36a7");
        let provider = ProviderBuilder::new().connect_mocked_client(asserter);

        // When
        let result = OnlineL1RollupProvider::new_with_chain_id(provider, ROLLUP_ADDRESS, 1).await;

        // Then
        assert!(matches!(
            result,
            Err(L1ProviderError::UnexpectedChainId { expected: 1, got: 11155111 })
        ));
    }

    #[tokio::test]
    async fn test_should_accept_expected_chain_id() -> eyre::Result<()> {
        // Given
        let asserter = Asserter::new();
        asserter.push_success(&"0x1");
        let provider = ProviderBuilder::new().connect_mocked_client(asserter);

        // When
        let provider =
            OnlineL1RollupProvider::new_with_chain_id(provider, ROLLUP_ADDRESS, 1).await?;

        // Then
        assert!(provider.filter.address.matches(&ROLLUP_ADDRESS));
        assert!(!provider.filter.address.matches(&Address::ZERO));

        Ok(())
    }
}
