//! Central place for all default values.
//! Update these and the whole app picks them up.

pub struct Defaults;

impl Defaults {

    /* Connection */
    pub const RPC_URL: &'static str = "https://rpc-amoy.polygon.technology";
    pub const CONTRACT_ADDRESS: &'static str = "0x70c68a1006a2780831fc6bed8ef1087ea95a4e18";
    pub const PRIVATE_KEY_ENV: &'static str = "PRIVATE_KEY";

    /* Transactions */
    pub const GAS_LIMIT: u64 = 300_000;
    pub const GAS_PRICE_GWEI: u64 = 30;
    pub const RECEIPT_POLL_MS: u64 = 1_000;

    /// Used when the revert reason can't be recovered. A guess, not a diagnosis.
    pub const FALLBACK_REVERT_REASON: &'static str = "exposure exceeds the authorized limit";

    /* Logging */
    pub const LOG_FILE: &'static str = "./risk-console.log";

    /* Add Counterparty form */
    pub const CREDIT_SCORE: &'static str = "100";
    pub const EXPOSURE_LIMIT: &'static str = "1000";
    pub const DEFAULT_PROBABILITY_PCT: &'static str = "10";
    pub const LOSS_GIVEN_DEFAULT_PCT: &'static str = "50";
    pub const COLLATERAL: &'static str = "0";

    /* Update Exposure form */
    pub const NEW_EXPOSURE: &'static str = "0";
}
