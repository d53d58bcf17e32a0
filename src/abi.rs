//! ABI of the deployed counterparty risk contract.
//!
//! Method names, parameter order and types must stay exactly as deployed.

use anyhow::{Context, Result};
use ethers_core::abi::Abi;

pub const ADD_COUNTERPARTY: &str = "ajouterContrepartie";
pub const UPDATE_EXPOSURE: &str = "mettreAJourExposition";
pub const RISK_SCORE: &str = "calculerRisque";
pub const COVERAGE_RATIO: &str = "calculerRatioCouverture";
pub const EXPECTED_LOSS: &str = "calculerPertesAttendues";
pub const COUNTERPARTIES: &str = "contreparties";

const RISK_CONTRACT_ABI: &str = r#"[
  {
    "inputs": [
      {"internalType": "address", "name": "_portefeuille", "type": "address"},
      {"internalType": "uint256", "name": "_scoreCredit", "type": "uint256"},
      {"internalType": "uint256", "name": "_limiteExposition", "type": "uint256"},
      {"internalType": "uint256", "name": "_probabiliteDefaut", "type": "uint256"},
      {"internalType": "uint256", "name": "_pertesEnCasDeDefaut", "type": "uint256"},
      {"internalType": "uint256", "name": "_collaterale", "type": "uint256"}
    ],
    "name": "ajouterContrepartie",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
  },
  {
    "inputs": [
      {"internalType": "address", "name": "_portefeuille", "type": "address"},
      {"internalType": "uint256", "name": "_nouvelleExposition", "type": "uint256"}
    ],
    "name": "mettreAJourExposition",
    "outputs": [],
    "stateMutability": "nonpayable",
    "type": "function"
  },
  {
    "inputs": [{"internalType": "address", "name": "_portefeuille", "type": "address"}],
    "name": "calculerRisque",
    "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [{"internalType": "address", "name": "_portefeuille", "type": "address"}],
    "name": "calculerRatioCouverture",
    "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [{"internalType": "address", "name": "_portefeuille", "type": "address"}],
    "name": "calculerPertesAttendues",
    "outputs": [{"internalType": "uint256", "name": "", "type": "uint256"}],
    "stateMutability": "view",
    "type": "function"
  },
  {
    "inputs": [{"internalType": "address", "name": "", "type": "address"}],
    "name": "contreparties",
    "outputs": [
      {"internalType": "address", "name": "portefeuille", "type": "address"},
      {"internalType": "uint256", "name": "scoreCredit", "type": "uint256"},
      {"internalType": "uint256", "name": "limiteExposition", "type": "uint256"},
      {"internalType": "uint256", "name": "expositionCourante", "type": "uint256"},
      {"internalType": "uint256", "name": "collaterale", "type": "uint256"},
      {"internalType": "uint256", "name": "probabiliteDefaut", "type": "uint256"},
      {"internalType": "uint256", "name": "pertesEnCasDeDefaut", "type": "uint256"}
    ],
    "stateMutability": "view",
    "type": "function"
  }
]"#;

pub fn load_abi() -> Result<Abi> {
    serde_json::from_str(RISK_CONTRACT_ABI).context("parsing embedded risk contract ABI")
}
