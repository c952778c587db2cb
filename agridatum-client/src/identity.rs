//! Credential hashing
//!
//! A farmer has no stored account: the farmer id and seed are derived
//! from (phone number, PIN) every time, so the same credentials always
//! land on the same identity.

use std::fmt;

use sha2::{Digest, Sha256};
use shared::DerivedIdentity;

use crate::error::{ClientError, ClientResult};

/// Length of the derived farmer id in hex characters
pub const FARMER_ID_LEN: usize = 16;

/// Required PIN length
pub const PIN_LEN: usize = 6;

/// Phone number and PIN as typed by the farmer
///
/// The PIN never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub phone_number: String,
    pin: String,
}

impl Credentials {
    pub fn new(phone_number: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            pin: pin.into(),
        }
    }

    /// Expose the PIN for hashing or validation
    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Derive the identity for these credentials
    pub fn derive(&self) -> DerivedIdentity {
        derive(&self.phone_number, &self.pin)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("phone_number", &self.phone_number)
            .field("pin", &"***REDACTED***")
            .finish()
    }
}

/// Lower-case hex SHA-256 of `input`
pub(crate) fn sha256_hex(input: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(input.as_ref()))
}

/// Derive seed input and farmer id from phone number and PIN.
///
/// `seed_input = sha256(phone ++ pin)`, `farmer_id = sha256(seed_input)[..16]`.
/// The PIN is not validated here.
pub fn derive(phone_number: &str, pin: &str) -> DerivedIdentity {
    let seed_input = sha256_hex(format!("{}{}", phone_number, pin));
    let mut farmer_id = sha256_hex(&seed_input);
    farmer_id.truncate(FARMER_ID_LEN);
    DerivedIdentity {
        seed_input,
        farmer_id,
    }
}

/// Check that a PIN is exactly six ASCII digits
pub fn validate_pin(pin: &str) -> ClientResult<()> {
    if pin.len() == PIN_LEN && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ClientError::validation("PIN must be exactly 6 digits."))
    }
}
