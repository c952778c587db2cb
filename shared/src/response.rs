//! API Response types
//!
//! Envelope returned by every harvest backend endpoint:
//! ```json
//! {
//!     "success": true,
//!     "data": { ... },
//!     "blockchain": { "submitted": true, "transactionHash": "..." }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the backend accepted the request
    #[serde(default)]
    pub success: bool,
    /// Response data (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Error text when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// On-chain anchoring status (submit endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<BlockchainStatus>,
    /// Paging window (listing endpoints only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            blockchain: None,
            pagination: None,
        }
    }

    /// Create a failed response
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            blockchain: None,
            pagination: None,
        }
    }

    /// Attach blockchain status
    pub fn with_blockchain(mut self, blockchain: BlockchainStatus) -> Self {
        self.blockchain = Some(blockchain);
        self
    }

    /// Best available error text: `error`, then `message`, then a generic fallback
    pub fn error_text(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "Request failed".to_string())
    }
}

/// Whether a submitted harvest was anchored on chain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainStatus {
    #[serde(default)]
    pub submitted: bool,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// Paging window echoed by listing endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: Option<u64>,
    pub limit: u32,
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_blockchain() {
        let json = r#"{"success":true,"data":{"id":7},"blockchain":{"submitted":true,"transactionHash":"abc123"}}"#;
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["id"], 7);
        let chain = resp.blockchain.unwrap();
        assert!(chain.submitted);
        assert_eq!(chain.transaction_hash.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_error_text_fallbacks() {
        let resp: ApiResponse<()> = serde_json::from_str(r#"{"success":false,"message":"busy"}"#).unwrap();
        assert_eq!(resp.error_text(), "busy");

        let resp: ApiResponse<()> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(resp.error_text(), "Request failed");

        let resp = ApiResponse::<()>::fail("duplicate harvest");
        assert_eq!(resp.error_text(), "duplicate harvest");
    }
}
