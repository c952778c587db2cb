//! Typed calls to the harvest backend

use shared::client::{
    HarvestRecordApi, HarvestSubmission, KeyGenerateRequest, KeyGenerateResponse,
    KeyHarvestData, RecordFilter, RecordId, RecordQuery, SubmittedRecord, VerificationResponse,
    VerifyRequest,
};
use serde_json::Value;
use shared::{ApiResponse, HarvestRecord, RecordConversionError};

use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, NetworkHttpClient};

pub const KEYS_GENERATE: &str = "/api/keys/generate";
pub const HARVEST_SUBMIT: &str = "/api/harvest/submit";
pub const HARVEST_VERIFY: &str = "/api/harvest/verify";
pub const HARVEST_RECORDS: &str = "/api/harvest/records";

/// Harvest backend API
#[derive(Debug, Clone)]
pub struct HarvestApi<H = NetworkHttpClient> {
    http: H,
}

impl<H: HttpClient> HarvestApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    /// Ask the key service for key material (and a signature when `harvest_data` is given)
    pub async fn generate_keys(
        &self,
        seed_input: &str,
        harvest_data: Option<KeyHarvestData>,
    ) -> ClientResult<KeyGenerateResponse> {
        let request = KeyGenerateRequest {
            seed_input,
            harvest_data,
        };
        self.http.post(KEYS_GENERATE, &request).await
    }

    /// Submit a harvest.
    ///
    /// The envelope is returned as-is; `success: false` is left to the caller.
    pub async fn submit_harvest(
        &self,
        submission: &HarvestSubmission,
    ) -> ClientResult<ApiResponse<SubmittedRecord>> {
        self.http.post(HARVEST_SUBMIT, submission).await
    }

    /// Verify a record by id and/or transaction hash
    pub async fn verify_harvest(
        &self,
        record_id: Option<RecordId>,
        transaction_hash: Option<&str>,
    ) -> ClientResult<VerificationResponse> {
        let transaction_hash = transaction_hash.filter(|h| !h.is_empty());
        if record_id.is_none() && transaction_hash.is_none() {
            return Err(ClientError::validation(
                "Either recordId or transactionHash is required",
            ));
        }
        let request = VerifyRequest {
            record_id,
            transaction_hash: transaction_hash.map(str::to_string),
        };
        self.http.post(HARVEST_VERIFY, &request).await
    }

    /// Whether the backend confirms the transaction on chain. Any failure reads as `false`.
    pub async fn verify_transaction(&self, transaction_hash: &str) -> bool {
        match self.verify_harvest(None, Some(transaction_hash)).await {
            Ok(resp) => resp.verification.blockchain_valid,
            Err(e) => {
                tracing::warn!("Transaction verification failed: {}", e);
                false
            }
        }
    }

    /// Records for one farmer, newest first as returned by the backend
    pub async fn records_by_farmer(
        &self,
        farmer_id: &str,
        limit: u32,
        offset: u32,
    ) -> ClientResult<Vec<HarvestRecord>> {
        let path = format!("{}/{}", HARVEST_RECORDS, farmer_id);
        let resp: ApiResponse<Vec<Value>> = self
            .http
            .get_with_query(&path, &RecordQuery { limit, offset })
            .await?;
        Ok(normalize_records(resp))
    }

    /// Records across all farmers, filtered
    pub async fn all_records(&self, filter: &RecordFilter) -> ClientResult<Vec<HarvestRecord>> {
        let resp: ApiResponse<Vec<Value>> =
            self.http.get_with_query(HARVEST_RECORDS, filter).await?;
        Ok(normalize_records(resp))
    }
}

/// Convert backend rows to client records, keeping backend order.
///
/// Rows are decoded one by one; a row that fails is skipped with a warning.
fn normalize_records(resp: ApiResponse<Vec<Value>>) -> Vec<HarvestRecord> {
    let rows = match resp.data {
        Some(rows) if resp.success => rows,
        _ => {
            tracing::info!("No records returned: {}", resp.error_text());
            return Vec::new();
        }
    };

    rows.into_iter()
        .filter_map(|row| match decode_row(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping record: {}", e);
                None
            }
        })
        .collect()
}

fn decode_row(row: Value) -> Result<HarvestRecord, RecordConversionError> {
    let row: HarvestRecordApi = serde_json::from_value(row)?;
    HarvestRecord::try_from(row)
}
