use anyhow::Result;
use ethers_core::abi::{Abi, Token};
use ethers_core::types::{Address, U256};

use crate::abi::{ADD_COUNTERPARTY, COUNTERPARTIES, UPDATE_EXPOSURE};
use crate::types::{ContractCall, RegisterCounterparty};

pub fn t_uint(v: U256) -> Token {
    Token::Uint(v)
}
pub fn t_addr(a: Address) -> Token {
    Token::Address(a)
}

pub fn encode_calldata(func: &ethers_core::abi::Function, args: Vec<Token>) -> Result<Vec<u8>> {
    Ok(func.encode_input(&args)?)
}

fn build_call(abi: &Abi, name: &str, args: Vec<Token>) -> Result<ContractCall> {
    let function = abi.function(name)?.clone();
    let calldata = encode_calldata(&function, args)?;
    Ok(ContractCall { function, calldata })
}

/// `ajouterContrepartie(portfolio, score, limit, pd, lgd, collateral)`
pub fn register_counterparty(abi: &Abi, portfolio: Address, form: &RegisterCounterparty) -> Result<ContractCall> {
    build_call(
        abi,
        ADD_COUNTERPARTY,
        vec![
            t_addr(portfolio),
            t_uint(form.credit_score),
            t_uint(form.exposure_limit),
            t_uint(form.default_probability_pct),
            t_uint(form.loss_given_default_pct),
            t_uint(form.collateral),
        ],
    )
}

/// `mettreAJourExposition(portfolio, exposure)`
pub fn update_exposure(abi: &Abi, portfolio: Address, exposure: U256) -> Result<ContractCall> {
    build_call(abi, UPDATE_EXPOSURE, vec![t_addr(portfolio), t_uint(exposure)])
}

/// Any of the single-address views (`calculer*`).
pub fn address_view(abi: &Abi, name: &str, portfolio: Address) -> Result<ContractCall> {
    build_call(abi, name, vec![t_addr(portfolio)])
}

pub fn counterparty_lookup(abi: &Abi, portfolio: Address) -> Result<ContractCall> {
    address_view(abi, COUNTERPARTIES, portfolio)
}
