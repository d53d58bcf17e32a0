//! In-memory `ChainClient` for unit tests. Records every request.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ethers_core::abi::{self, Token};
use ethers_core::types::{Address, Bytes, Transaction, TransactionReceipt, H256, U256, U64};
use ethers_core::utils::{keccak256, rlp};

use crate::abi::load_abi;
use crate::chain::{CallRequest, ChainClient};
use crate::error::ChainError;
use crate::session::{Session, Settings};

// anvil/hardhat account #0
pub const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    ChainId,
    TransactionCount(Address),
    SendRaw(Bytes),
    Receipt(H256),
    Transaction(H256),
    Call(CallRequest),
}

pub struct FakeChain {
    chain_id: Result<u64, String>,
    nonce: Result<U256, String>,
    send_error: Option<String>,
    receipt_status: Option<u64>,
    pending_polls: Mutex<usize>,
    transaction_lookup: bool,
    simulation: Result<Bytes, ChainError>,
    views: HashMap<[u8; 4], Result<Bytes, ChainError>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeChain {
    pub const MINED_BLOCK: u64 = 1_234;

    pub fn new() -> Self {
        Self {
            chain_id: Ok(31337),
            nonce: Ok(U256::zero()),
            send_error: None,
            receipt_status: Some(1),
            pending_polls: Mutex::new(0),
            transaction_lookup: true,
            simulation: Err(ChainError::Rpc { message: "execution reverted".into(), revert_data: None }),
            views: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn contract() -> Address {
        crate::defaults::Defaults::CONTRACT_ADDRESS.parse().unwrap()
    }

    pub fn with_chain_id(mut self, id: u64) -> Self {
        self.chain_id = Ok(id);
        self
    }
    pub fn with_chain_id_error(mut self, msg: &str) -> Self {
        self.chain_id = Err(msg.to_string());
        self
    }
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Ok(U256::from(nonce));
        self
    }
    pub fn with_nonce_error(mut self, msg: &str) -> Self {
        self.nonce = Err(msg.to_string());
        self
    }
    pub fn with_send_error(mut self, msg: &str) -> Self {
        self.send_error = Some(msg.to_string());
        self
    }
    pub fn with_receipt_status(mut self, status: u64) -> Self {
        self.receipt_status = Some(status);
        self
    }
    /// Receipt without a status field, as some nodes return.
    pub fn without_receipt_status(mut self) -> Self {
        self.receipt_status = None;
        self
    }
    /// Number of `None` receipts returned before the real one.
    pub fn with_pending_polls(self, n: usize) -> Self {
        *self.pending_polls.lock().unwrap() = n;
        self
    }
    pub fn without_transaction_lookup(mut self) -> Self {
        self.transaction_lookup = false;
        self
    }
    /// Response to the block-pinned `eth_call` used for revert recovery.
    pub fn with_simulation(mut self, res: Result<Bytes, ChainError>) -> Self {
        self.simulation = res;
        self
    }
    /// Response to a latest-state `eth_call` of `method`.
    pub fn with_view(mut self, method: &str, res: Result<Bytes, ChainError>) -> Self {
        let abi = load_abi().unwrap();
        let selector = abi.function(method).unwrap().short_signature();
        self.views.insert(selector, res);
        self
    }

    fn record(&self, req: Request) {
        self.requests.lock().unwrap().push(req);
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn sent_transactions(&self) -> Vec<Transaction> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::SendRaw(raw) => rlp::decode::<Transaction>(&raw).ok(),
                _ => None,
            })
            .collect()
    }

    pub fn last_sent_hash(&self) -> Option<H256> {
        self.requests().into_iter().rev().find_map(|r| match r {
            Request::SendRaw(raw) => Some(H256::from(keccak256(&raw))),
            _ => None,
        })
    }

    /// Calldata of every latest-state `eth_call`, in order.
    pub fn view_calls(&self) -> Vec<Bytes> {
        self.requests()
            .into_iter()
            .filter_map(|r| match r {
                Request::Call(c) if c.block.is_none() => Some(c.data),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn chain_id(&self) -> Result<u64, ChainError> {
        self.record(Request::ChainId);
        self.chain_id.clone().map_err(ChainError::Transport)
    }

    async fn transaction_count(&self, address: Address) -> Result<U256, ChainError> {
        self.record(Request::TransactionCount(address));
        self.nonce.clone().map_err(ChainError::Transport)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, ChainError> {
        self.record(Request::SendRaw(raw.clone()));
        match &self.send_error {
            Some(msg) => Err(ChainError::Rpc { message: msg.clone(), revert_data: None }),
            None => Ok(H256::from(keccak256(&raw))),
        }
    }

    async fn transaction_receipt(&self, hash: H256) -> Result<Option<TransactionReceipt>, ChainError> {
        self.record(Request::Receipt(hash));
        let mut pending = self.pending_polls.lock().unwrap();
        if *pending > 0 {
            *pending -= 1;
            return Ok(None);
        }
        Ok(Some(TransactionReceipt {
            transaction_hash: hash,
            status: self.receipt_status.map(U64::from),
            block_number: Some(U64::from(Self::MINED_BLOCK)),
            ..Default::default()
        }))
    }

    async fn transaction(&self, hash: H256) -> Result<Option<Transaction>, ChainError> {
        self.record(Request::Transaction(hash));
        if !self.transaction_lookup {
            return Ok(None);
        }
        let mut tx = self.sent_transactions().pop().unwrap_or_default();
        tx.block_number = Some(U64::from(Self::MINED_BLOCK));
        Ok(Some(tx))
    }

    async fn call(&self, req: CallRequest) -> Result<Bytes, ChainError> {
        self.record(Request::Call(req.clone()));
        if req.block.is_some() {
            return self.simulation.clone();
        }
        let selector: Option<[u8; 4]> = req.data.get(..4).and_then(|s| s.try_into().ok());
        selector
            .and_then(|s| self.views.get(&s).cloned())
            .unwrap_or_else(|| Err(ChainError::Transport("no response configured".into())))
    }
}

pub fn uint_output(v: u64) -> Bytes {
    abi::encode(&[Token::Uint(U256::from(v))]).into()
}

pub fn counterparty_output(wallet: Address, values: [u64; 6]) -> Bytes {
    let mut tokens = vec![Token::Address(wallet)];
    tokens.extend(values.iter().map(|v| Token::Uint(U256::from(*v))));
    abi::encode(&tokens).into()
}

pub fn error_string_payload(msg: &str) -> Vec<u8> {
    let mut out = vec![0x08, 0xc3, 0x79, 0xa0];
    out.extend(abi::encode(&[Token::String(msg.into())]));
    out
}

pub async fn session_with(chain: Arc<FakeChain>) -> Session {
    let settings = Settings { receipt_poll: Duration::from_millis(1), ..Settings::default() };
    Session::bootstrap(&settings, Some(DEV_KEY.to_string()), chain).await.unwrap()
}
