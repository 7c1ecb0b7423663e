use alloy_primitives::{B256, U256};
use alloy_provider::Provider;
use alloy_transport::{RpcError, TransportErrorKind};
use reth_primitives_traits::transaction::TxHashRef;
use rollup_node_primitives::{L2BlockData, L2TransactionData, L2_MESSAGE_QUEUE_ADDRESS};
use scroll_alloy_consensus::ScrollTransaction;
use scroll_alloy_network::Scroll;

/// The storage slot of the withdraw trie root in the L2 message queue contract.
pub const WITHDRAW_TRIE_ROOT_SLOT: U256 = U256::ZERO;

/// An error occurring at the [`L2BlockProvider`].
#[derive(Debug, thiserror::Error)]
pub enum L2ProviderError {
    /// L2 RPC error.
    #[error(transparent)]
    Rpc(#[from] RpcError<TransportErrorKind>),
}

/// Implementers of the trait can return blocks and post state of the local L2 chain.
#[async_trait::async_trait]
#[auto_impl::auto_impl(&, Arc)]
pub trait L2BlockProvider: Send + Sync {
    /// Returns the block at the provided height, or [`None`] if the local chain does not hold it.
    async fn block_by_number(&self, number: u64) -> Result<Option<L2BlockData>, L2ProviderError>;

    /// Returns the withdraw trie root of the post execution state of the provided block.
    async fn withdraw_root(&self, block_hash: B256) -> Result<B256, L2ProviderError>;
}

/// An implementation of the [`L2BlockProvider`] backed by an alloy [`Provider`] over the
/// [`Scroll`] network.
#[derive(Debug, Clone)]
pub struct OnlineL2BlockProvider<P> {
    provider: P,
}

impl<P: Provider<Scroll>> OnlineL2BlockProvider<P> {
    /// Returns a new instance of a [`OnlineL2BlockProvider`].
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

#[async_trait::async_trait]
impl<P: Provider<Scroll>> L2BlockProvider for OnlineL2BlockProvider<P> {
    async fn block_by_number(&self, number: u64) -> Result<Option<L2BlockData>, L2ProviderError> {
        tracing::trace!(target: "scroll::providers", number, "fetching L2 block");

        let Some(block) = self.provider.get_block(number.into()).full().await? else {
            return Ok(None)
        };
        let hash = block.header.hash;
        let block = block.into_consensus().map_transactions(|tx| tx.inner.into_inner());
        let transactions = block
            .body
            .transactions
            .iter()
            .map(|tx| L2TransactionData { hash: *tx.tx_hash(), queue_index: tx.queue_index() })
            .collect();

        Ok(Some(L2BlockData { hash, header: block.header, transactions }))
    }

    async fn withdraw_root(&self, block_hash: B256) -> Result<B256, L2ProviderError> {
        let root = self
            .provider
            .get_storage_at(L2_MESSAGE_QUEUE_ADDRESS, WITHDRAW_TRIE_ROOT_SLOT)
            .block_id(block_hash.into())
            .await?;
        Ok(root.into())
    }
}
