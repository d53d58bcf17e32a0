use std::fmt;

use ethers_core::abi::Function;
use ethers_core::types::{Address, H256, U256};
use serde::Serialize;

/// Values collected by the Add Counterparty form, already integer-cast.
/// The portfolio address is not part of the form: it is always the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCounterparty {
    pub credit_score: U256,
    pub exposure_limit: U256,
    pub default_probability_pct: U256,
    pub loss_given_default_pct: U256,
    pub collateral: U256,
}

/// A counterparty as stored by the contract. Field order matches the
/// `contreparties(address)` output tuple.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CounterpartyRecord {
    pub wallet: Address,
    pub credit_score: U256,
    pub exposure_limit: U256,
    pub current_exposure: U256,
    pub collateral: U256,
    pub default_probability: U256,
    pub loss_given_default: U256,
}

impl CounterpartyRecord {
    /// Unknown addresses come back as an all-zero tuple.
    pub fn is_registered(&self) -> bool {
        !self.wallet.is_zero()
    }

    pub fn to_display(&self) -> CounterpartyDisplay {
        CounterpartyDisplay {
            wallet: format!("{:?}", self.wallet),
            credit_score: self.credit_score.to_string(),
            exposure_limit: self.exposure_limit.to_string(),
            current_exposure: self.current_exposure.to_string(),
            collateral: self.collateral.to_string(),
            default_probability: self.default_probability.to_string(),
            loss_given_default: self.loss_given_default.to_string(),
        }
    }
}

/// Labelled, ordered shape used for the JSON view on the info screen.
#[derive(Debug, Serialize)]
pub struct CounterpartyDisplay {
    #[serde(rename = "Wallet")]
    pub wallet: String,
    #[serde(rename = "Credit score")]
    pub credit_score: String,
    #[serde(rename = "Exposure limit")]
    pub exposure_limit: String,
    #[serde(rename = "Current exposure")]
    pub current_exposure: String,
    #[serde(rename = "Collateral")]
    pub collateral: String,
    #[serde(rename = "Default probability")]
    pub default_probability: String,
    #[serde(rename = "Loss given default")]
    pub loss_given_default: String,
}

/// An encoded call against the risk contract, ready for `submit` or `call`.
#[derive(Debug, Clone)]
pub struct ContractCall {
    pub function: Function,
    pub calldata: Vec<u8>,
}

impl ContractCall {
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// How a revert reason was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonSource {
    /// Decoded from re-running the call against the receipt's block.
    Simulated,
    /// Nothing decodable came back; the fixed message is a guess.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevertReason {
    pub message: String,
    pub source: ReasonSource,
}

impl RevertReason {
    pub fn simulated(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: ReasonSource::Simulated }
    }

    pub fn fallback(message: impl Into<String>) -> Self {
        Self { message: message.into(), source: ReasonSource::Fallback }
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            ReasonSource::Simulated => {
                write!(f, "{} (recovered by re-simulation, best effort)", self.message)
            }
            ReasonSource::Fallback => {
                write!(f, "{} (assumed: the node returned no revert reason)", self.message)
            }
        }
    }
}

/// Result of one `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Confirmed { tx_hash: H256 },
    Reverted { tx_hash: H256, reason: RevertReason },
    Failed { error: String },
}

impl TxOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, TxOutcome::Confirmed { .. })
    }
}

/// The three contract-computed metrics. Each read stands alone.
#[derive(Debug, Clone)]
pub struct RiskMetrics {
    pub risk_score: Result<U256, String>,
    pub coverage_ratio: Result<U256, String>,
    pub expected_loss: Result<U256, String>,
}

impl RiskMetrics {
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        [
            ("risk score", &self.risk_score),
            ("coverage ratio", &self.coverage_ratio),
            ("expected loss", &self.expected_loss),
        ]
        .into_iter()
        .filter_map(|(label, r)| r.as_ref().err().map(|e| (label, e.as_str())))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// What an action leaves on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub lines: Vec<String>,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, lines: Vec<String>) -> Self {
        Self { level, title: title.into(), lines }
    }
    pub fn success(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self::new(NoticeLevel::Success, title, lines)
    }
    pub fn warning(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, lines)
    }
    pub fn error(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self::new(NoticeLevel::Error, title, lines)
    }
    pub fn info(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self::new(NoticeLevel::Info, title, lines)
    }
}
