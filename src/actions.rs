//! The four user actions. Each issues its contract traffic through the
//! session's dispatcher and turns the result into a `Notice`; screens only
//! collect input and draw what comes back.

use anyhow::Result;
use ethers_core::types::U256;
use tracing::{info, warn};

use crate::abi::{COVERAGE_RATIO, EXPECTED_LOSS, RISK_SCORE};
use crate::decoder::{decode_counterparty, decode_single_uint};
use crate::encoding::{address_view, counterparty_lookup, register_counterparty, update_exposure};
use crate::error::FormError;
use crate::session::Session;
use crate::types::{Notice, RegisterCounterparty, RiskMetrics, TxOutcome};
use crate::util::parse_integer_cast;

/* ───────────────────────── Form parsing ───────────────────────── */

fn bounded(field: &'static str, raw: &str, min: u64, max: Option<u64>) -> Result<U256, FormError> {
    let v = parse_integer_cast(raw).map_err(|e| FormError::Invalid { field, reason: e.to_string() })?;
    let too_high = max.map(|m| v > U256::from(m)).unwrap_or(false);
    if v < U256::from(min) || too_high {
        return Err(FormError::OutOfRange {
            field,
            min,
            max: max.unwrap_or(u64::MAX),
            got: raw.trim().to_string(),
        });
    }
    Ok(v)
}

/// Raw text of the Add Counterparty form, in display order.
#[derive(Debug, Clone)]
pub struct AddCounterpartyInput<'a> {
    pub credit_score: &'a str,
    pub exposure_limit: &'a str,
    pub default_probability_pct: &'a str,
    pub loss_given_default_pct: &'a str,
    pub collateral: &'a str,
}

impl AddCounterpartyInput<'_> {
    pub fn parse(&self) -> Result<RegisterCounterparty, FormError> {
        Ok(RegisterCounterparty {
            credit_score: bounded("Credit score", self.credit_score, 1, None)?,
            exposure_limit: bounded("Exposure limit", self.exposure_limit, 1, None)?,
            default_probability_pct: bounded("Default probability (%)", self.default_probability_pct, 0, Some(100))?,
            loss_given_default_pct: bounded("Loss given default (%)", self.loss_given_default_pct, 0, Some(100))?,
            collateral: bounded("New collateral", self.collateral, 0, None)?,
        })
    }
}

pub fn parse_exposure(raw: &str) -> Result<U256, FormError> {
    bounded("New exposure", raw, 0, None)
}

/* ───────────────────────── Writes ───────────────────────── */

fn tx_notice(outcome: &TxOutcome, done: &str, failed: &str) -> Notice {
    if !outcome.is_confirmed() {
        warn!(outcome = ?outcome, "{failed}");
    }
    match outcome {
        TxOutcome::Confirmed { tx_hash } => Notice::success(done, vec![format!("Transaction hash: {:?}", tx_hash)]),
        TxOutcome::Reverted { tx_hash, reason } => Notice::error(
            failed,
            vec![format!("Transaction reverted: {reason}"), format!("Transaction hash: {:?}", tx_hash)],
        ),
        TxOutcome::Failed { error } => Notice::error(failed, vec![format!("Error: {error}")]),
    }
}

fn form_notice(err: FormError) -> Notice {
    Notice::error("Invalid input", vec![err.to_string()])
}

pub async fn add_counterparty(session: &Session, input: &AddCounterpartyInput<'_>) -> Result<Notice> {
    let form = match input.parse() {
        Ok(f) => f,
        Err(e) => return Ok(form_notice(e)),
    };
    let call = register_counterparty(&session.abi, session.operator, &form)?;
    let dispatcher = session.dispatcher();
    info!(?form, "registering counterparty");
    let outcome = dispatcher.submit(&call, dispatcher.default_gas_limit()).await;
    Ok(tx_notice(&outcome, "Counterparty added", "Transaction failed"))
}

pub async fn update_counterparty_exposure(session: &Session, raw_exposure: &str) -> Result<Notice> {
    let exposure = match parse_exposure(raw_exposure) {
        Ok(v) => v,
        Err(e) => return Ok(form_notice(e)),
    };
    let call = update_exposure(&session.abi, session.operator, exposure)?;
    let dispatcher = session.dispatcher();
    info!(%exposure, "updating exposure");
    let outcome = dispatcher.submit(&call, dispatcher.default_gas_limit()).await;
    Ok(tx_notice(&outcome, "Exposure updated", "Update failed"))
}

/* ───────────────────────── Reads ───────────────────────── */

async fn read_metric(session: &Session, method: &str) -> Result<U256, String> {
    let read = async {
        let call = address_view(&session.abi, method, session.operator)?;
        let out = session.dispatcher().call(&call).await?;
        decode_single_uint(&out)
    };
    read.await.map_err(|e: anyhow::Error| {
        warn!(method, error = %format!("{e:#}"), "risk read failed");
        format!("{e:#}")
    })
}

/// Each read is issued on its own; one failing does not skip the others.
pub async fn read_risk_metrics(session: &Session) -> RiskMetrics {
    RiskMetrics {
        risk_score: read_metric(session, RISK_SCORE).await,
        coverage_ratio: read_metric(session, COVERAGE_RATIO).await,
        expected_loss: read_metric(session, EXPECTED_LOSS).await,
    }
}

pub async fn compute_risk(session: &Session) -> Result<Notice> {
    let m = read_risk_metrics(session).await;

    let mut lines = Vec::new();
    if let Ok(v) = &m.risk_score {
        lines.push(format!("Risk score: {v}"));
    }
    if let Ok(v) = &m.coverage_ratio {
        lines.push(format!("Coverage ratio: {v}%"));
    }
    if let Ok(v) = &m.expected_loss {
        lines.push(format!("Expected loss: {v}"));
    }

    let failures = m.failures();
    if failures.is_empty() {
        return Ok(Notice::success("Risk metrics", lines));
    }
    let causes = failures
        .iter()
        .map(|(label, err)| format!("{label}: {err}"))
        .collect::<Vec<_>>()
        .join("; ");
    lines.push(format!("Error while computing risk: {causes}"));
    Ok(Notice::error("Risk metrics", lines))
}

pub async fn show_info(session: &Session) -> Result<Notice> {
    let read = async {
        let call = counterparty_lookup(&session.abi, session.operator)?;
        let out = session.dispatcher().call(&call).await?;
        decode_counterparty(&out)
    };
    let record = match read.await {
        Ok(r) => r,
        Err(e) => {
            warn!(error = %format!("{e:#}"), "counterparty lookup failed");
            return Ok(Notice::error("Counterparty info", vec![format!("Error: {e:#}")]));
        }
    };

    if !record.is_registered() {
        return Ok(Notice::warning("Counterparty info", vec!["No counterparty found.".to_string()]));
    }
    let json = serde_json::to_string_pretty(&record.to_display())?;
    Ok(Notice::info("Counterparty info", json.lines().map(str::to_string).collect()))
}
