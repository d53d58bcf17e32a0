//! The only place that touches nonces, signing and receipts.
//!
//! `submit` runs one state-changing call to completion and always returns a
//! `TxOutcome`; `call` runs one read-only call and decodes its output.
//! Nothing here retries and nothing keeps state between calls.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ethers_core::abi::Token;
use ethers_core::types::{Address, TransactionReceipt, H256, U256, U64};
use ethers_signers::{LocalWallet, Signer};
use tracing::{debug, error, info, warn};

use crate::chain::{CallRequest, ChainClient};
use crate::decoder::{decode_revert_data, reason_from_node_message};
use crate::defaults::Defaults;
use crate::error::ChainError;
use crate::signing::{sign_legacy, TxParams};
use crate::types::{ContractCall, RevertReason, TxOutcome};

pub struct Dispatcher {
    chain: Arc<dyn ChainClient>,
    wallet: LocalWallet,
    contract: Address,
    params: TxParams,
    poll_interval: Duration,
}

impl Dispatcher {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        wallet: LocalWallet,
        contract: Address,
        params: TxParams,
        poll_interval: Duration,
    ) -> Self {
        Self { chain, wallet, contract, params, poll_interval }
    }

    pub fn sender(&self) -> Address {
        self.wallet.address()
    }

    pub fn default_gas_limit(&self) -> U256 {
        self.params.gas_limit
    }

    /// Build, sign, send and wait for `call`. Blocks until a receipt shows up;
    /// there is no timeout.
    pub async fn submit(&self, call: &ContractCall, gas_limit: U256) -> TxOutcome {
        match self.try_submit(call, gas_limit).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(method = call.name(), error = %format!("{e:#}"), "submission failed");
                TxOutcome::Failed { error: format!("{e:#}") }
            }
        }
    }

    async fn try_submit(&self, call: &ContractCall, gas_limit: U256) -> Result<TxOutcome> {
        // Fetched fresh every time; there is no local nonce cache.
        let nonce = self.chain.transaction_count(self.sender()).await?;
        let params = TxParams { gas_limit, ..self.params };
        let signed = sign_legacy(&self.wallet, self.contract, nonce, params, call.calldata.clone()).await?;

        let local_hash = signed.hash;
        let tx_hash = self.chain.send_raw_transaction(signed.raw).await?;
        if tx_hash != local_hash {
            warn!(tx = ?tx_hash, local = ?local_hash, "node returned a different transaction hash");
        }
        info!(method = call.name(), %nonce, tx = ?tx_hash, "transaction sent");

        let receipt = self.wait_for_receipt(tx_hash).await?;
        if receipt.status == Some(U64::one()) {
            info!(tx = ?tx_hash, block = ?receipt.block_number, "transaction confirmed");
            return Ok(TxOutcome::Confirmed { tx_hash });
        }

        let reason = self.recover_revert_reason(tx_hash, receipt.block_number).await;
        warn!(tx = ?tx_hash, source = ?reason.source, reason = %reason.message, "transaction reverted");
        Ok(TxOutcome::Reverted { tx_hash, reason })
    }

    async fn wait_for_receipt(&self, tx_hash: H256) -> Result<TransactionReceipt, ChainError> {
        loop {
            if let Some(receipt) = self.chain.transaction_receipt(tx_hash).await? {
                return Ok(receipt);
            }
            debug!(tx = ?tx_hash, "receipt not yet available");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Re-run the mined transaction as an `eth_call` at its block and try to
    /// read a reason out of whatever comes back. Chain state may have moved
    /// on, so the answer is best effort; with nothing readable the fixed
    /// fallback message is used.
    pub async fn recover_revert_reason(&self, tx_hash: H256, receipt_block: Option<U64>) -> RevertReason {
        match self.simulate_failed_call(tx_hash, receipt_block).await {
            Some(msg) => RevertReason::simulated(msg),
            None => RevertReason::fallback(Defaults::FALLBACK_REVERT_REASON),
        }
    }

    async fn simulate_failed_call(&self, tx_hash: H256, receipt_block: Option<U64>) -> Option<String> {
        let tx = match self.chain.transaction(tx_hash).await {
            Ok(Some(tx)) => tx,
            Ok(None) => {
                debug!(tx = ?tx_hash, "transaction not found for re-simulation");
                return None;
            }
            Err(e) => {
                debug!(tx = ?tx_hash, error = %e, "transaction lookup failed");
                return None;
            }
        };

        let req = CallRequest {
            from: Some(tx.from),
            to: tx.to?,
            data: tx.input.clone(),
            block: tx.block_number.or(receipt_block).map(|n| n.as_u64()),
        };

        match self.chain.call(req).await {
            Ok(bytes) => decode_revert_data(&bytes),
            Err(ChainError::Rpc { message, revert_data }) => revert_data
                .as_deref()
                .and_then(decode_revert_data)
                .or_else(|| reason_from_node_message(&message)),
            Err(e) => {
                debug!(tx = ?tx_hash, error = %e, "re-simulation failed");
                None
            }
        }
    }

    /// Read-only call against latest state, decoded with the function's outputs.
    pub async fn call(&self, call: &ContractCall) -> Result<Vec<Token>> {
        let req = CallRequest {
            from: Some(self.sender()),
            to: self.contract,
            data: call.calldata.clone().into(),
            block: None,
        };
        let out = self.chain.call(req).await?;
        Ok(call.function.decode_output(&out)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{load_abi, RISK_SCORE};
    use crate::encoding::{address_view, update_exposure};
    use crate::testing::{error_string_payload, uint_output, FakeChain, Request, DEV_KEY};
    use crate::types::ReasonSource;
    use crate::key::wallet_from_hex;

    fn dispatcher(chain: Arc<FakeChain>) -> Dispatcher {
        let wallet = wallet_from_hex(DEV_KEY, 31337).unwrap();
        let params = TxParams { gas_limit: U256::from(300_000u64), gas_price: U256::from(30_000_000_000u64) };
        Dispatcher::new(chain, wallet, FakeChain::contract(), params, Duration::from_millis(1))
    }

    fn exposure_call() -> ContractCall {
        let abi = load_abi().unwrap();
        update_exposure(&abi, Address::repeat_byte(1), U256::from(500u64)).unwrap()
    }

    #[tokio::test]
    async fn success_receipt_yields_hash() {
        let chain = Arc::new(FakeChain::new().with_receipt_status(1));
        let d = dispatcher(chain.clone());
        let outcome = d.submit(&exposure_call(), d.default_gas_limit()).await;
        match outcome {
            TxOutcome::Confirmed { tx_hash } => {
                assert!(!tx_hash.is_zero());
                assert_eq!(Some(tx_hash), chain.last_sent_hash());
            }
            other => panic!("expected Confirmed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn polls_until_receipt_appears() {
        let chain = Arc::new(FakeChain::new().with_receipt_status(1).with_pending_polls(3));
        let d = dispatcher(chain.clone());
        assert!(d.submit(&exposure_call(), d.default_gas_limit()).await.is_confirmed());
        let polls = chain.requests().iter().filter(|r| matches!(r, Request::Receipt(_))).count();
        assert_eq!(polls, 4);
    }

    #[tokio::test]
    async fn nonce_is_fetched_before_every_submission() {
        let chain = Arc::new(FakeChain::new().with_receipt_status(1).with_nonce(7));
        let d = dispatcher(chain.clone());
        d.submit(&exposure_call(), d.default_gas_limit()).await;
        d.submit(&exposure_call(), d.default_gas_limit()).await;

        let reqs = chain.requests();
        let nonce_reads = reqs.iter().filter(|r| matches!(r, Request::TransactionCount(_))).count();
        assert_eq!(nonce_reads, 2);
        // First request of each submission is the nonce read.
        assert!(matches!(reqs[0], Request::TransactionCount(a) if a == d.sender()));
        assert_eq!(chain.sent_transactions()[0].nonce, U256::from(7u64));
    }

    #[tokio::test]
    async fn uses_fixed_gas_price_and_caller_gas_limit() {
        let chain = Arc::new(FakeChain::new().with_receipt_status(1));
        let d = dispatcher(chain.clone());
        d.submit(&exposure_call(), U256::from(123_456u64)).await;
        let tx = &chain.sent_transactions()[0];
        assert_eq!(tx.gas, U256::from(123_456u64));
        assert_eq!(tx.gas_price, Some(U256::from(30_000_000_000u64)));
        assert_eq!(tx.to, Some(FakeChain::contract()));
    }

    #[tokio::test]
    async fn revert_reason_is_decoded_from_simulation() {
        let chain = Arc::new(
            FakeChain::new()
                .with_receipt_status(0)
                .with_simulation(Err(ChainError::Rpc {
                    message: "execution reverted".into(),
                    revert_data: Some(error_string_payload("Exposure above limit").into()),
                })),
        );
        let d = dispatcher(chain.clone());
        match d.submit(&exposure_call(), d.default_gas_limit()).await {
            TxOutcome::Reverted { reason, tx_hash } => {
                assert_eq!(reason.source, ReasonSource::Simulated);
                assert_eq!(reason.message, "Exposure above limit");
                assert!(!tx_hash.is_zero());
            }
            other => panic!("expected Reverted, got {other:?}"),
        }
        // The simulation is pinned to the block the transaction was mined in.
        let sim = chain.requests().into_iter().find_map(|r| match r {
            Request::Call(c) => Some(c),
            _ => None,
        });
        assert_eq!(sim.unwrap().block, Some(FakeChain::MINED_BLOCK));
    }

    #[tokio::test]
    async fn revert_reason_from_node_message() {
        let chain = Arc::new(FakeChain::new().with_receipt_status(0).with_simulation(Err(ChainError::Rpc {
            message: "execution reverted: Exposition depasse la limite".into(),
            revert_data: None,
        })));
        let d = dispatcher(chain);
        match d.submit(&exposure_call(), d.default_gas_limit()).await {
            TxOutcome::Reverted { reason, .. } => {
                assert_eq!(reason.source, ReasonSource::Simulated);
                assert_eq!(reason.message, "Exposition depasse la limite");
            }
            other => panic!("expected Reverted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_revert_falls_back() {
        let chain = Arc::new(FakeChain::new().with_receipt_status(0).with_simulation(Ok(vec![0u8; 32].into())));
        let d = dispatcher(chain);
        match d.submit(&exposure_call(), d.default_gas_limit()).await {
            TxOutcome::Reverted { reason, .. } => {
                assert_eq!(reason.source, ReasonSource::Fallback);
                assert_eq!(reason.message, Defaults::FALLBACK_REVERT_REASON);
            }
            other => panic!("expected Reverted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn receipt_without_status_counts_as_revert() {
        let chain = Arc::new(FakeChain::new().without_receipt_status());
        let d = dispatcher(chain.clone());
        match d.submit(&exposure_call(), d.default_gas_limit()).await {
            TxOutcome::Reverted { tx_hash, reason } => {
                assert_eq!(Some(tx_hash), chain.last_sent_hash());
                assert_eq!(reason.source, ReasonSource::Fallback);
            }
            other => panic!("expected Reverted, got {other:?}"),
        }
        assert!(chain.requests().iter().any(|r| matches!(r, Request::Transaction(_))));
    }

    #[tokio::test]
    async fn missing_transaction_falls_back() {
        let chain = Arc::new(FakeChain::new().with_receipt_status(0).without_transaction_lookup());
        let d = dispatcher(chain.clone());
        match d.submit(&exposure_call(), d.default_gas_limit()).await {
            TxOutcome::Reverted { reason, .. } => assert_eq!(reason.source, ReasonSource::Fallback),
            other => panic!("expected Reverted, got {other:?}"),
        }
        assert!(!chain.requests().iter().any(|r| matches!(r, Request::Call(_))));
    }

    #[tokio::test]
    async fn send_error_becomes_failed_with_raw_text() {
        let chain = Arc::new(FakeChain::new().with_send_error("insufficient funds for gas * price + value"));
        let d = dispatcher(chain.clone());
        match d.submit(&exposure_call(), d.default_gas_limit()).await {
            TxOutcome::Failed { error } => assert!(error.contains("insufficient funds")),
            other => panic!("expected Failed, got {other:?}"),
        }
        // No automatic retry and no receipt polling.
        let sends = chain.requests().iter().filter(|r| matches!(r, Request::SendRaw(_))).count();
        assert_eq!(sends, 1);
        assert!(!chain.requests().iter().any(|r| matches!(r, Request::Receipt(_))));
    }

    #[tokio::test]
    async fn nonce_error_becomes_failed() {
        let chain = Arc::new(FakeChain::new().with_nonce_error("connection reset"));
        let d = dispatcher(chain.clone());
        let outcome = d.submit(&exposure_call(), d.default_gas_limit()).await;
        assert!(matches!(outcome, TxOutcome::Failed { ref error } if error.contains("connection reset")));
        assert!(chain.sent_transactions().is_empty());
    }

    #[tokio::test]
    async fn call_decodes_output() {
        let chain = Arc::new(FakeChain::new().with_view(RISK_SCORE, Ok(uint_output(42))));
        let d = dispatcher(chain.clone());
        let abi = load_abi().unwrap();
        let call = address_view(&abi, RISK_SCORE, d.sender()).unwrap();
        let out = d.call(&call).await.unwrap();
        assert_eq!(out, vec![Token::Uint(U256::from(42u64))]);

        let req = chain.requests().into_iter().find_map(|r| match r {
            Request::Call(c) => Some(c),
            _ => None,
        }).unwrap();
        assert_eq!(req.block, None);
        assert_eq!(req.to, FakeChain::contract());
    }

    #[tokio::test]
    async fn call_error_propagates() {
        let chain = Arc::new(FakeChain::new());
        let d = dispatcher(chain);
        let abi = load_abi().unwrap();
        let call = address_view(&abi, RISK_SCORE, d.sender()).unwrap();
        assert!(d.call(&call).await.is_err());
    }
}
