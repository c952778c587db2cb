//! Harvest Model

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::client::HarvestRecordApi;
use crate::util::truncate_chars;

/// Length of the signature preview kept on a record for display.
///
/// The preview is never fed back into verification.
pub const SIGNATURE_PREVIEW_LEN: usize = 32;

/// Identity derived from (phone number, PIN)
///
/// `seed_input` is key material input, so `Debug` only shows the farmer id.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedIdentity {
    pub seed_input: String,
    pub farmer_id: String,
}

impl fmt::Debug for DerivedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedIdentity")
            .field("seed_input", &"***REDACTED***")
            .field("farmer_id", &self.farmer_id)
            .finish()
    }
}

/// Harvest payload that gets signed
///
/// Field order is part of the signed byte string; do not reorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestPayload {
    pub crop_type: String,
    pub weight_kg: f64,
    pub location_text: String,
    /// ISO-8601 UTC
    pub timestamp: String,
    pub farmer_id: String,
}

/// Key material and signature for one payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub public_key: String,
    pub signature: String,
    pub farmer_address: String,
    /// None when nothing was anchored on chain
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// Harvest record as shown in the records list and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestRecord {
    pub id: String,
    pub phone_number: String,
    pub plot_location: String,
    pub crop_type: String,
    pub weight_kg: f64,
    pub timestamp: String,
    pub transaction_hash: Option<String>,
    pub public_key: String,
    pub farmer_address: String,
    /// Display preview, at most [`SIGNATURE_PREVIEW_LEN`] chars
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed_on_chain: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_id: Option<String>,
}

impl HarvestRecord {
    /// Signature preview for display
    pub fn signature_preview(signature: &str) -> String {
        truncate_chars(signature, SIGNATURE_PREVIEW_LEN)
    }
}

/// Backend row could not be turned into a client record
#[derive(Debug, Error)]
pub enum RecordConversionError {
    #[error("record {id}: invalid weight {value:?}")]
    InvalidWeight { id: String, value: String },

    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl TryFrom<HarvestRecordApi> for HarvestRecord {
    type Error = RecordConversionError;

    fn try_from(api: HarvestRecordApi) -> Result<Self, Self::Error> {
        let id = api.id.to_string();
        let weight_kg = api
            .weight_kg
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .ok_or_else(|| RecordConversionError::InvalidWeight {
                id: id.clone(),
                value: api.weight_kg.clone(),
            })?;

        Ok(Self {
            id,
            phone_number: api.phone_number,
            plot_location: api.plot_location,
            crop_type: api.crop_type,
            weight_kg,
            timestamp: api.timestamp,
            transaction_hash: api.transaction_hash,
            public_key: api.public_key,
            farmer_address: api.farmer_address,
            signature: api.signature.as_deref().map(Self::signature_preview),
            indexed_on_chain: Some(api.indexed_on_chain),
            farmer_id: Some(api.farmer_id),
        })
    }
}
