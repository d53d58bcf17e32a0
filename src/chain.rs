//! The narrow slice of the node's JSON-RPC surface the console uses.

use async_trait::async_trait;
use ethers_core::types::{
    transaction::eip2718::TypedTransaction, Address, BlockId, BlockNumber, Bytes, Transaction,
    TransactionReceipt, TransactionRequest, H256, U256,
};
use ethers_providers::{Http, JsonRpcError, Middleware, Provider, ProviderError, RpcError};

use crate::error::ChainError;
use crate::util::hex_to_bytes;

/// Read-only `eth_call` parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub from: Option<Address>,
    pub to: Address,
    pub data: Bytes,
    /// `None` means latest.
    pub block: Option<u64>,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn chain_id(&self) -> Result<u64, ChainError>;
    async fn transaction_count(&self, address: Address) -> Result<U256, ChainError>;
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, ChainError>;
    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>, ChainError>;
    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>, ChainError>;
    async fn call(&self, req: CallRequest) -> Result<Bytes, ChainError>;
}

/// `ChainClient` over an ethers HTTP provider.
#[derive(Debug, Clone)]
pub struct RpcChain {
    provider: Provider<Http>,
}

impl RpcChain {
    pub fn connect(url: &str) -> Result<Self, ChainError> {
        let provider = Provider::<Http>::try_from(url)
            .map_err(|e| ChainError::Transport(format!("invalid RPC url {url}: {e}")))?;
        Ok(Self { provider })
    }
}

#[async_trait]
impl ChainClient for RpcChain {
    async fn chain_id(&self) -> Result<u64, ChainError> {
        let id = self.provider.get_chainid().await.map_err(ChainError::from)?;
        Ok(id.low_u64())
    }

    async fn transaction_count(&self, address: Address) -> Result<U256, ChainError> {
        let block = Some(BlockId::Number(BlockNumber::Latest));
        Ok(self.provider.get_transaction_count(address, block).await?)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, ChainError> {
        let pending = self.provider.send_raw_transaction(raw).await?;
        Ok(pending.tx_hash())
    }

    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>, ChainError> {
        Ok(self.provider.get_transaction_receipt(hash).await?)
    }

    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>, ChainError> {
        Ok(self.provider.get_transaction(hash).await?)
    }

    async fn call(&self, req: CallRequest) -> Result<Bytes, ChainError> {
        let mut tx = TransactionRequest::new().to(req.to).data(req.data);
        if let Some(from) = req.from {
            tx = tx.from(from);
        }
        let typed = TypedTransaction::Legacy(tx);
        let block = req.block.map(|n| BlockId::Number(BlockNumber::Number(n.into())));
        Ok(self.provider.call(&typed, block).await?)
    }
}

impl From<ProviderError> for ChainError {
    fn from(err: ProviderError) -> Self {
        match err.as_error_response() {
            Some(resp) => ChainError::Rpc {
                message: resp.message.clone(),
                revert_data: revert_data_of(resp),
            },
            None => ChainError::Transport(err.to_string()),
        }
    }
}

/// Nodes put revert bytes in `error.data`, either as a hex string or nested one level.
fn revert_data_of(resp: &JsonRpcError) -> Option<Bytes> {
    let data = resp.data.as_ref()?;
    let hex = data
        .as_str()
        .or_else(|| data.get("data").and_then(|d| d.as_str()))?;
    hex_to_bytes(hex).ok().map(Bytes::from)
}
