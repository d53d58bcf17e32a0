use ethers_signers::{LocalWallet, Signer};
use k256::ecdsa::SigningKey;
use zeroize::Zeroizing;

use crate::error::BootstrapError;
use crate::util::hex_to_bytes;

/// Parse a hex private key (with or without `0x`) into a wallet bound to `chain_id`.
/// The decoded key bytes are wiped on drop.
pub fn wallet_from_hex(raw: &str, chain_id: u64) -> Result<LocalWallet, BootstrapError> {
    let bytes = Zeroizing::new(
        hex_to_bytes(raw.trim()).map_err(|e| BootstrapError::InvalidKey(e.to_string()))?,
    );
    if bytes.len() != 32 {
        return Err(BootstrapError::InvalidKey(format!("expected 32 bytes, got {}", bytes.len())));
    }
    let sk = SigningKey::from_slice(&bytes).map_err(|e| BootstrapError::InvalidKey(e.to_string()))?;
    Ok(LocalWallet::from(sk).with_chain_id(chain_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::Address;

    // Well-known dev key (anvil/hardhat account #0).
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn derives_known_address() {
        let w = wallet_from_hex(DEV_KEY, 31337).unwrap();
        let expected: Address = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".parse().unwrap();
        assert_eq!(w.address(), expected);
        assert_eq!(w.chain_id(), 31337);
    }

    #[test]
    fn accepts_key_without_prefix() {
        let w = wallet_from_hex(DEV_KEY.trim_start_matches("0x"), 1).unwrap();
        assert_eq!(w.address(), wallet_from_hex(DEV_KEY, 1).unwrap().address());
    }

    #[test]
    fn rejects_bad_keys() {
        assert!(matches!(wallet_from_hex("0x1234", 1), Err(BootstrapError::InvalidKey(_))));
        assert!(matches!(wallet_from_hex("not hex", 1), Err(BootstrapError::InvalidKey(_))));
        let zero = format!("0x{}", "00".repeat(32));
        assert!(matches!(wallet_from_hex(&zero, 1), Err(BootstrapError::InvalidKey(_))));
    }
}
