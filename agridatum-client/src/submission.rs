//! Harvest submission pipeline
//!
//! validate → derive → sign → submit → normalize. Each stage feeds the
//! next, so nothing runs concurrently and nothing is retried here.

use serde::Serialize;
use shared::client::{HarvestSubmission, SubmittedRecord};
use shared::util::now_iso8601;
use shared::{BlockchainStatus, HarvestPayload, HarvestRecord, SubmissionResult};

use crate::api::HarvestApi;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::signer::{SigningChain, SigningStrategy};
use crate::validation::HarvestForm;

/// A harvest accepted by the backend
#[derive(Debug, Clone)]
pub struct Submitted {
    pub record: HarvestRecord,
    pub blockchain: Option<BlockchainStatus>,
    pub strategy: SigningStrategy,
}

/// Result of a submission as presented to the farmer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<HarvestRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ClientResult<Submitted>> for SubmitOutcome {
    fn from(result: ClientResult<Submitted>) -> Self {
        match result {
            Ok(submitted) => Self {
                success: true,
                record: Some(submitted.record),
                blockchain: submitted.blockchain,
                error: None,
            },
            Err(e) => Self {
                success: false,
                record: None,
                blockchain: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Run the whole pipeline for one form
pub async fn submit_harvest<H: HttpClient>(
    api: &HarvestApi<H>,
    signing: &SigningChain,
    form: &HarvestForm,
) -> ClientResult<Submitted> {
    let weight_kg = form.validate()?;
    let identity = form.credentials.derive();

    let payload = HarvestPayload {
        crop_type: form.crop_type.clone(),
        weight_kg,
        location_text: form.plot_location.clone(),
        timestamp: now_iso8601(),
        farmer_id: identity.farmer_id.clone(),
    };

    let (strategy, signed) = signing
        .sign(
            api,
            &payload,
            &form.credentials.phone_number,
            &identity.seed_input,
        )
        .await?;

    let submission = HarvestSubmission {
        farmer_id: payload.farmer_id.clone(),
        phone_number: form.credentials.phone_number.clone(),
        plot_location: payload.location_text.clone(),
        crop_type: payload.crop_type.clone(),
        weight_kg: payload.weight_kg,
        timestamp: payload.timestamp.clone(),
        public_key: signed.public_key.clone(),
        signature: Some(signed.signature.clone()),
    };

    tracing::info!("Submitting harvest for farmer {}", payload.farmer_id);
    let resp = api.submit_harvest(&submission).await?;
    if !resp.success {
        return Err(ClientError::Rejected(resp.error_text()));
    }

    let record = build_record(
        &payload,
        &form.credentials.phone_number,
        &signed,
        resp.data.unwrap_or_default(),
        resp.blockchain.as_ref(),
    );
    tracing::info!(
        "Harvest recorded: id={} on_chain={}",
        record.id,
        record.indexed_on_chain.unwrap_or(false)
    );

    Ok(Submitted {
        record,
        blockchain: resp.blockchain,
        strategy,
    })
}

/// Merge what was sent, how it was signed and what the backend echoed.
///
/// Backend values win where present; a record without a backend id gets a fresh UUID.
pub(crate) fn build_record(
    payload: &HarvestPayload,
    phone_number: &str,
    signed: &SubmissionResult,
    data: SubmittedRecord,
    blockchain: Option<&BlockchainStatus>,
) -> HarvestRecord {
    let id = data
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let transaction_hash = blockchain
        .and_then(|b| b.transaction_hash.clone())
        .or(data.transaction_hash)
        .or_else(|| signed.transaction_hash.clone());

    HarvestRecord {
        id,
        phone_number: phone_number.to_string(),
        plot_location: payload.location_text.clone(),
        crop_type: payload.crop_type.clone(),
        weight_kg: payload.weight_kg,
        timestamp: payload.timestamp.clone(),
        transaction_hash,
        public_key: signed.public_key.clone(),
        farmer_address: signed.farmer_address.clone(),
        signature: Some(HarvestRecord::signature_preview(&signed.signature)),
        indexed_on_chain: blockchain.map(|b| b.submitted).or(data.indexed_on_chain),
        farmer_id: Some(payload.farmer_id.clone()),
    }
}
