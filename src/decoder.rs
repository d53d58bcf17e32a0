use anyhow::{anyhow, Result};
use ethers_core::abi::{self, ParamType, Token};
use ethers_core::types::U256;

use crate::types::CounterpartyRecord;

/// `Error(string)`
const ERROR_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];
/// `Panic(uint256)`
const PANIC_SELECTOR: [u8; 4] = [0x4e, 0x48, 0x7b, 0x71];

fn as_uint(tok: &Token) -> Result<U256> {
    match tok {
        Token::Uint(u) => Ok(*u),
        _ => Err(anyhow!("expected uint")),
    }
}

/// Single `uint256` output of the `calculer*` views.
pub fn decode_single_uint(tokens: &[Token]) -> Result<U256> {
    match tokens {
        [t] => as_uint(t),
        _ => Err(anyhow!("expected one output value, got {}", tokens.len())),
    }
}

/// Output of `contreparties(address)`.
pub fn decode_counterparty(tokens: &[Token]) -> Result<CounterpartyRecord> {
    let t = match tokens {
        [Token::Tuple(v)] if v.len() == 7 => v.as_slice(),
        t if t.len() == 7 => t,
        _ => return Err(anyhow!("unexpected counterparty tuple ({} fields)", tokens.len())),
    };
    let wallet = match &t[0] {
        Token::Address(a) => *a,
        _ => return Err(anyhow!("expected address in first field")),
    };
    Ok(CounterpartyRecord {
        wallet,
        credit_score: as_uint(&t[1])?,
        exposure_limit: as_uint(&t[2])?,
        current_exposure: as_uint(&t[3])?,
        collateral: as_uint(&t[4])?,
        default_probability: as_uint(&t[5])?,
        loss_given_default: as_uint(&t[6])?,
    })
}

/// Revert payload -> human-readable text, if it carries any.
pub fn decode_revert_data(data: &[u8]) -> Option<String> {
    if data.len() >= 4 && data[..4] == ERROR_SELECTOR {
        let tokens = abi::decode(&[ParamType::String], &data[4..]).ok()?;
        return match tokens.into_iter().next() {
            Some(Token::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        };
    }
    if data.len() >= 4 && data[..4] == PANIC_SELECTOR {
        let tokens = abi::decode(&[ParamType::Uint(256)], &data[4..]).ok()?;
        let code = tokens.first().and_then(|t| as_uint(t).ok())?;
        return Some(format!("panic code {:#x}", code));
    }
    printable_text(data)
}

/// Node error messages such as `execution reverted: limit exceeded`.
pub fn reason_from_node_message(message: &str) -> Option<String> {
    let (_, rest) = message.split_once("reverted:")?;
    let reason = rest.trim();
    if reason.is_empty() { None } else { Some(reason.to_string()) }
}

// Plain bytes read as text; only accepted when it looks like a message.
fn printable_text(data: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(data).ok()?;
    let text = text.trim_matches(char::from(0)).trim();
    if text.is_empty() || text.chars().any(|c| c.is_control()) {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::Address;

    fn error_payload(msg: &str) -> Vec<u8> {
        let mut out = ERROR_SELECTOR.to_vec();
        out.extend(abi::encode(&[Token::String(msg.into())]));
        out
    }

    #[test]
    fn decodes_error_string() {
        let data = error_payload("Exposure above limit");
        assert_eq!(decode_revert_data(&data).as_deref(), Some("Exposure above limit"));
    }

    #[test]
    fn decodes_panic_code() {
        let mut data = PANIC_SELECTOR.to_vec();
        data.extend(abi::encode(&[Token::Uint(U256::from(0x11u64))]));
        assert_eq!(decode_revert_data(&data).as_deref(), Some("panic code 0x11"));
    }

    #[test]
    fn empty_or_binary_payload_has_no_reason() {
        assert_eq!(decode_revert_data(&[]), None);
        assert_eq!(decode_revert_data(&[0u8; 32]), None);
        assert_eq!(decode_revert_data(&[0xff, 0xfe, 0x01]), None);
    }

    #[test]
    fn plain_text_payload_is_accepted() {
        assert_eq!(decode_revert_data(b"limit reached").as_deref(), Some("limit reached"));
    }

    #[test]
    fn node_message_reason() {
        assert_eq!(
            reason_from_node_message("execution reverted: Exposition depasse la limite").as_deref(),
            Some("Exposition depasse la limite")
        );
        assert_eq!(reason_from_node_message("execution reverted"), None);
        assert_eq!(reason_from_node_message("nonce too low"), None);
    }

    #[test]
    fn counterparty_from_flat_tokens() {
        let wallet = Address::repeat_byte(0x42);
        let mut tokens = vec![Token::Address(wallet)];
        tokens.extend((1u64..=6).map(|n| Token::Uint(U256::from(n))));
        let rec = decode_counterparty(&tokens).unwrap();
        assert_eq!(rec.wallet, wallet);
        assert_eq!(rec.credit_score, U256::from(1u64));
        assert_eq!(rec.current_exposure, U256::from(3u64));
        assert_eq!(rec.loss_given_default, U256::from(6u64));
    }

    #[test]
    fn counterparty_rejects_short_tuple() {
        let tokens = vec![Token::Address(Address::zero()), Token::Uint(U256::one())];
        assert!(decode_counterparty(&tokens).is_err());
    }

    #[test]
    fn single_uint() {
        assert_eq!(decode_single_uint(&[Token::Uint(U256::from(9u64))]).unwrap(), U256::from(9u64));
        assert!(decode_single_uint(&[]).is_err());
        assert!(decode_single_uint(&[Token::Bool(true)]).is_err());
    }
}
