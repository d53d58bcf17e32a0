use clap::Parser;
use std::path::PathBuf;

use crate::defaults::Defaults;

/// Counterparty risk console: register counterparties and read back
/// contract-computed risk metrics over JSON-RPC.
///
/// Every option falls back to an environment variable (a `.env` file in the
/// working directory is loaded first). The signing key is read from
/// `PRIVATE_KEY` only.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Counterparty risk console")]
pub struct Cli {
    /// HTTP JSON-RPC endpoint of the chain node
    #[arg(long, env = "RPC_URL", default_value = Defaults::RPC_URL)]
    pub rpc_url: String,

    /// Address of the deployed risk contract
    #[arg(long, env = "CONTRACT_ADDRESS", default_value = Defaults::CONTRACT_ADDRESS)]
    pub contract_address: String,

    /// Gas limit for state-changing calls
    #[arg(long, env = "GAS_LIMIT", default_value_t = Defaults::GAS_LIMIT)]
    pub gas_limit: u64,

    /// Fixed gas price, in gwei
    #[arg(long, env = "GAS_PRICE_GWEI", default_value_t = Defaults::GAS_PRICE_GWEI)]
    pub gas_price_gwei: u64,

    /// Receipt polling interval, in milliseconds
    #[arg(long, env = "RECEIPT_POLL_MS", default_value_t = Defaults::RECEIPT_POLL_MS)]
    pub receipt_poll_ms: u64,

    /// Where log output goes (the terminal belongs to the UI)
    #[arg(long, env = "LOG_FILE", default_value = Defaults::LOG_FILE)]
    pub log_file: PathBuf,
}
