//! Local deterministic signing stub
//!
//! Digests only: the values look like key material but no public-key
//! scheme can verify them. Used when the key service is unavailable and
//! the deployment opts in.

use shared::{HarvestPayload, SubmissionResult};

use crate::error::ClientResult;
use crate::identity::sha256_hex;

/// Prefix marking stub addresses so they are never mistaken for real ones
pub const STUB_ADDRESS_PREFIX: &str = "addr_stub_";

const STUB_ADDRESS_HEX_LEN: usize = 56;

pub fn sign(payload: &HarvestPayload, seed_input: &str) -> ClientResult<SubmissionResult> {
    let public_key = sha256_hex(format!("{}:public", seed_input));

    let mut address_digest = sha256_hex(format!("address:{}", seed_input));
    address_digest.truncate(STUB_ADDRESS_HEX_LEN);
    let farmer_address = format!("{}{}", STUB_ADDRESS_PREFIX, address_digest);

    let message = serde_json::to_string(payload)?;
    let signature = sha256_hex(format!("{}{}", message, seed_input));

    Ok(SubmissionResult {
        public_key,
        signature,
        farmer_address,
        transaction_hash: None,
    })
}
