use anyhow::{anyhow, Result};
use ethers_core::types::{Address, U256};

/// Integer cast of a decimal form value: "12" and "12.9" both give 12.
pub fn parse_integer_cast(s: &str) -> Result<U256> {
    let t = s.trim();
    if t.is_empty() {
        return Err(anyhow!("empty value"));
    }
    let whole = match t.split_once('.') {
        Some((int, frac)) => {
            if !frac.chars().all(|c| c.is_ascii_digit()) {
                return Err(anyhow!("not a number: {t}"));
            }
            if int.is_empty() { "0" } else { int }
        }
        None => t,
    };
    if whole.starts_with('-') {
        return Err(anyhow!("negative values are not allowed: {t}"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("not a number: {t}"));
    }
    U256::from_dec_str(whole).map_err(|_| anyhow!("not a number: {t}"))
}

pub fn parse_addr(s: &str) -> Result<Address> {
    Ok(s.trim().parse::<Address>()?)
}

pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    let t = s.strip_prefix("0x").unwrap_or(s);
    Ok(hex::decode(t)?)
}
