//! Client-related types for the harvest backend
//!
//! Request/response bodies exchanged with the backend. Requests use
//! camelCase keys; stored harvest rows come back in snake_case.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::HarvestPayload;

// =============================================================================
// Identifiers
// =============================================================================

/// Backend record id (integer in practice, text tolerated)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

// =============================================================================
// Key API DTOs
// =============================================================================

/// Harvest fields sent alongside the seed for remote signing
///
/// Carries the same field set the submit endpoint later receives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyHarvestData {
    pub farmer_id: String,
    pub phone_number: String,
    pub plot_location: String,
    pub crop_type: String,
    pub weight_kg: f64,
    pub timestamp: String,
}

impl KeyHarvestData {
    pub fn new(payload: &HarvestPayload, phone_number: &str) -> Self {
        Self {
            farmer_id: payload.farmer_id.clone(),
            phone_number: phone_number.to_string(),
            plot_location: payload.location_text.clone(),
            crop_type: payload.crop_type.clone(),
            weight_kg: payload.weight_kg,
            timestamp: payload.timestamp.clone(),
        }
    }
}

/// Key generation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenerateRequest<'a> {
    pub seed_input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest_data: Option<KeyHarvestData>,
}

/// Key generation response
///
/// Every field is optional on the wire; the signer decides which ones are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenerateResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub public_key: Option<String>,
    #[serde(default)]
    pub farmer_address: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub farmer_id: Option<String>,
}

// =============================================================================
// Harvest API DTOs
// =============================================================================

/// Harvest submission request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestSubmission {
    pub farmer_id: String,
    pub phone_number: String,
    pub plot_location: String,
    pub crop_type: String,
    pub weight_kg: f64,
    pub timestamp: String,
    pub public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Stored harvest row as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestRecordApi {
    pub id: RecordId,
    pub farmer_id: String,
    pub phone_number: String,
    pub plot_location: String,
    pub crop_type: String,
    /// Decimal string, e.g. `"12.50"`
    #[serde(deserialize_with = "string_or_number")]
    pub weight_kg: String,
    pub timestamp: String,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    pub farmer_address: String,
    #[serde(default)]
    pub indexed_on_chain: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    pub public_key: String,
    #[serde(default)]
    pub signature: Option<String>,
}

/// Row echoed by the submit endpoint
///
/// Backends may return the full row or only its id, so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmittedRecord {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub indexed_on_chain: Option<bool>,
    #[serde(default)]
    pub farmer_address: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
}

/// Query window for per-farmer listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordQuery {
    pub limit: u32,
    pub offset: u32,
}

/// Filters for the all-records listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            crop_type: None,
            start_date: None,
            end_date: None,
            limit: 100,
            offset: 0,
        }
    }
}

// =============================================================================
// Verification DTOs
// =============================================================================

/// Verification request; at least one of the two fields must be set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// Verification response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub record: Option<VerifiedRecord>,
    pub verification: Verification,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// Record summary echoed by verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedRecord {
    pub id: RecordId,
    pub farmer_id: String,
    pub crop_type: String,
    pub weight_kg: f64,
    pub timestamp: String,
    pub farmer_address: String,
}

/// Verification verdict
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// None when the backend could not check the signature
    #[serde(default)]
    pub signature_valid: Option<bool>,
    #[serde(default)]
    pub blockchain_indexed: bool,
    #[serde(default)]
    pub blockchain_valid: bool,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
