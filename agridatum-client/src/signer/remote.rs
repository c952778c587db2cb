//! Remote signing through the backend key service

use shared::client::KeyHarvestData;
use shared::{HarvestPayload, SubmissionResult};

use crate::api::HarvestApi;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// Ask the backend to derive keys from `seed_input` and sign `payload`
/// together with the farmer's phone number.
///
/// A 2xx answer without signature, public key or address is a contract
/// violation, reported as [`ClientError::MissingField`].
pub async fn sign<H: HttpClient>(
    api: &HarvestApi<H>,
    payload: &HarvestPayload,
    phone_number: &str,
    seed_input: &str,
) -> ClientResult<SubmissionResult> {
    tracing::info!("Generating keys and signature for farmer {}", payload.farmer_id);
    let resp = api
        .generate_keys(seed_input, Some(KeyHarvestData::new(payload, phone_number)))
        .await?;

    let signature = required(resp.signature, "signature")?;
    let public_key = required(resp.public_key, "public key")?;
    let farmer_address = required(resp.farmer_address, "farmer address")?;

    Ok(SubmissionResult {
        public_key,
        signature,
        farmer_address,
        transaction_hash: None,
    })
}

fn required(value: Option<String>, what: &str) -> ClientResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ClientError::MissingField(format!("Backend did not return a {}", what)))
}
