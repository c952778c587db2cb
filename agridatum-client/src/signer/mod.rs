//! Key/signature providers
//!
//! A [`SigningChain`] holds the configured strategies in order. Each is
//! tried in turn:
//!
//! - a transport failure (unreachable backend, non-2xx) moves on to the
//!   next strategy;
//! - anything else stops the chain, notably a 2xx key response that is
//!   missing its signature or does not decode. No values are made up for
//!   a misbehaving backend.
//!
//! Both strategies are pure with respect to `(payload, seed_input)`.

pub mod local;
pub mod remote;

use std::fmt;
use std::str::FromStr;

use shared::{HarvestPayload, SubmissionResult};

use crate::api::HarvestApi;
use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;

/// How key material and signatures are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigningStrategy {
    /// Backend key service (`/api/keys/generate`)
    Remote,
    /// Local digest stub; offline mode, not verifiable cryptography
    LocalStub,
}

impl SigningStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningStrategy::Remote => "remote",
            SigningStrategy::LocalStub => "local",
        }
    }
}

impl fmt::Display for SigningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SigningStrategy {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(SigningStrategy::Remote),
            "local" | "local-stub" | "local_stub" | "stub" => Ok(SigningStrategy::LocalStub),
            other => Err(ClientError::Config(format!(
                "unknown signing strategy '{}'",
                other
            ))),
        }
    }
}

/// Ordered list of signing strategies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningChain {
    strategies: Vec<SigningStrategy>,
}

impl SigningChain {
    pub fn new(strategies: Vec<SigningStrategy>) -> Self {
        Self { strategies }
    }

    /// Parse a comma-separated list, e.g. `"remote,local"`
    pub fn parse(spec: &str) -> ClientResult<Self> {
        let strategies = spec
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<ClientResult<Vec<_>>>()?;
        if strategies.is_empty() {
            return Err(ClientError::Config("no signing strategy configured".into()));
        }
        Ok(Self { strategies })
    }

    pub fn strategies(&self) -> &[SigningStrategy] {
        &self.strategies
    }

    /// Sign `payload`, returning the strategy that succeeded and its result
    ///
    /// `phone_number` goes to the key service only; the local stub signs the payload alone.
    pub async fn sign<H: HttpClient>(
        &self,
        api: &HarvestApi<H>,
        payload: &HarvestPayload,
        phone_number: &str,
        seed_input: &str,
    ) -> ClientResult<(SigningStrategy, SubmissionResult)> {
        let mut last_err = None;

        for (i, strategy) in self.strategies.iter().enumerate() {
            let result = match strategy {
                SigningStrategy::Remote => {
                    remote::sign(api, payload, phone_number, seed_input).await
                }
                SigningStrategy::LocalStub => local::sign(payload, seed_input),
            };

            match result {
                Ok(signed) => {
                    tracing::info!("Harvest signed with {} strategy", strategy);
                    return Ok((*strategy, signed));
                }
                Err(e) if e.is_transport() && i + 1 < self.strategies.len() => {
                    tracing::warn!("{} signing failed, trying next strategy: {}", strategy, e);
                    last_err = Some(e);
                }
                Err(e) => {
                    tracing::error!("{} signing failed: {}", strategy, e);
                    return Err(e);
                }
            }
        }

        Err(last_err
            .unwrap_or_else(|| ClientError::Config("no signing strategy configured".into())))
    }
}

impl Default for SigningChain {
    fn default() -> Self {
        Self::new(vec![SigningStrategy::Remote])
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::mock::MockHttpClient;

    const PHONE: &str = "+254700000001";

    fn payload() -> HarvestPayload {
        HarvestPayload {
            crop_type: "Maize".into(),
            weight_kg: 50.0,
            location_text: "North Field".into(),
            timestamp: "2025-03-01T10:00:00.000Z".into(),
            farmer_id: "0123456789abcdef".into(),
        }
    }

    #[test]
    fn test_parse_chain() {
        let chain = SigningChain::parse("remote, local").unwrap();
        assert_eq!(
            chain.strategies(),
            &[SigningStrategy::Remote, SigningStrategy::LocalStub]
        );
        assert!(SigningChain::parse("").is_err());
        assert!(SigningChain::parse("remote,ledger").is_err());
    }

    #[tokio::test]
    async fn test_remote_success_is_used() {
        let api = HarvestApi::new(MockHttpClient::new().reply(
            "POST",
            "/api/keys/generate",
            json!({ "publicKey": "pk", "farmerAddress": "addr", "signature": "sig" }),
        ));
        let chain = SigningChain::parse("remote,local").unwrap();

        let (strategy, result) = chain.sign(&api, &payload(), PHONE, "seed").await.unwrap();
        assert_eq!(strategy, SigningStrategy::Remote);
        assert_eq!(result.signature, "sig");
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back() {
        let api = HarvestApi::new(MockHttpClient::new().fail(
            "POST",
            "/api/keys/generate",
            503,
            "HTTP 503",
        ));
        let chain = SigningChain::parse("remote,local").unwrap();

        let (strategy, result) = chain.sign(&api, &payload(), PHONE, "seed").await.unwrap();
        assert_eq!(strategy, SigningStrategy::LocalStub);
        assert_eq!(result, local::sign(&payload(), "seed").unwrap());
    }

    #[tokio::test]
    async fn test_missing_signature_stops_chain() {
        let api = HarvestApi::new(MockHttpClient::new().reply(
            "POST",
            "/api/keys/generate",
            json!({ "publicKey": "pk", "farmerAddress": "addr" }),
        ));
        let chain = SigningChain::parse("remote,local").unwrap();

        let err = chain.sign(&api, &payload(), PHONE, "seed").await.unwrap_err();
        assert!(err.to_string().contains("signature"));
    }

    #[tokio::test]
    async fn test_undecodable_key_response_stops_chain() {
        let api = HarvestApi::new(MockHttpClient::new().reply(
            "POST",
            "/api/keys/generate",
            json!({ "publicKey": "pk", "farmerAddress": "addr", "signature": 12345 }),
        ));
        let chain = SigningChain::parse("remote,local").unwrap();

        let err = chain.sign(&api, &payload(), PHONE, "seed").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert_eq!(api.http().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_last_transport_error_returned() {
        let api = HarvestApi::new(MockHttpClient::new().fail(
            "POST",
            "/api/keys/generate",
            500,
            "key service down",
        ));
        let err = SigningChain::default()
            .sign(&api, &payload(), PHONE, "seed")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "key service down");
    }
}
