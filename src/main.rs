use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

mod abi;
mod actions;
mod app;
mod chain;
mod cli;
mod decoder;
mod defaults;
mod dispatcher;
mod encoding;
mod error;
mod key;
mod logging;
mod screens;
mod session;
mod signing;
mod types;
mod ui;
mod util;

#[cfg(test)]
mod testing;

use crate::chain::RpcChain;
use crate::cli::Cli;
use crate::defaults::Defaults;
use crate::session::{Session, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // a missing .env is fine; real env vars still apply
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(&cli.log_file)?;
    info!(rpc = %cli.rpc_url, contract = %cli.contract_address, "starting risk console");

    let private_key = std::env::var(Defaults::PRIVATE_KEY_ENV).ok();
    let session = match RpcChain::connect(&cli.rpc_url) {
        Ok(chain) => Session::bootstrap(&Settings::from(&cli), private_key, Arc::new(chain)).await,
        Err(e) => {
            error!(error = %e, "cannot build RPC client");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let session = match session {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "startup failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    app::run_menu(session).await
}
