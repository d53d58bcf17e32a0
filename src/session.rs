//! Process-wide connection state, built once at startup.

use std::sync::Arc;
use std::time::Duration;

use ethers_core::abi::Abi;
use ethers_core::types::{Address, U256};
use ethers_signers::{LocalWallet, Signer};
use tracing::info;
use zeroize::Zeroizing;

use crate::abi::load_abi;
use crate::chain::ChainClient;
use crate::cli::Cli;
use crate::defaults::Defaults;
use crate::dispatcher::Dispatcher;
use crate::error::BootstrapError;
use crate::key::wallet_from_hex;
use crate::signing::TxParams;
use crate::util::parse_addr;

/// Non-secret connection settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub rpc_url: String,
    pub contract_address: String,
    pub gas_limit: u64,
    pub gas_price_gwei: u64,
    pub receipt_poll: Duration,
}

impl From<&Cli> for Settings {
    fn from(cli: &Cli) -> Self {
        Self {
            rpc_url: cli.rpc_url.clone(),
            contract_address: cli.contract_address.clone(),
            gas_limit: cli.gas_limit,
            gas_price_gwei: cli.gas_price_gwei,
            receipt_poll: Duration::from_millis(cli.receipt_poll_ms),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rpc_url: Defaults::RPC_URL.to_string(),
            contract_address: Defaults::CONTRACT_ADDRESS.to_string(),
            gas_limit: Defaults::GAS_LIMIT,
            gas_price_gwei: Defaults::GAS_PRICE_GWEI,
            receipt_poll: Duration::from_millis(Defaults::RECEIPT_POLL_MS),
        }
    }
}

/// One operator, one key, one chain handle. Never rotated.
pub struct Session {
    pub rpc_url: String,
    pub chain_id: u64,
    pub operator: Address,
    pub contract: Address,
    pub abi: Abi,
    dispatcher: Dispatcher,
}

impl Session {
    /// Fails fast: missing or bad key, bad contract address, or an
    /// unreachable node all end the process before the UI starts.
    pub async fn bootstrap(
        settings: &Settings,
        private_key: Option<String>,
        chain: Arc<dyn ChainClient>,
    ) -> Result<Self, BootstrapError> {
        let key = match private_key {
            Some(k) if !k.trim().is_empty() => Zeroizing::new(k),
            _ => return Err(BootstrapError::MissingKey(Defaults::PRIVATE_KEY_ENV)),
        };
        // Validate before touching the network; chain id is patched in below.
        wallet_from_hex(&key, 1)?;

        let contract = parse_addr(&settings.contract_address).map_err(|e| {
            BootstrapError::InvalidContractAddress {
                address: settings.contract_address.clone(),
                reason: e.to_string(),
            }
        })?;
        let abi = load_abi().map_err(|e| BootstrapError::Abi(format!("{e:#}")))?;

        let chain_id = chain.chain_id().await.map_err(|e| BootstrapError::Unreachable {
            url: settings.rpc_url.clone(),
            reason: e.to_string(),
        })?;

        let wallet: LocalWallet = wallet_from_hex(&key, chain_id)?;
        let operator = wallet.address();
        info!(rpc = %settings.rpc_url, chain_id, operator = ?operator, contract = ?contract, "session ready");

        let params = TxParams {
            gas_limit: U256::from(settings.gas_limit),
            gas_price: gwei(settings.gas_price_gwei),
        };
        let dispatcher = Dispatcher::new(chain, wallet, contract, params, settings.receipt_poll);

        Ok(Self {
            rpc_url: settings.rpc_url.clone(),
            chain_id,
            operator,
            contract,
            abi,
            dispatcher,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn banner(&self) -> Vec<String> {
        vec![
            format!("Connected to {} (chain id {})", self.rpc_url, self.chain_id),
            format!("Wallet address: {:?}", self.operator),
            format!("Contract address: {:?}", self.contract),
        ]
    }
}

fn gwei(amount: u64) -> U256 {
    U256::from(amount) * U256::exp10(9)
}
