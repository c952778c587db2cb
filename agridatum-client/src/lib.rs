//! AgriDatum Client - harvest recording client for the AgriDatum backend
//!
//! Derives farmer identities from phone number and PIN, signs harvest
//! payloads through a configurable strategy chain, submits them over
//! HTTP and keeps the farmer's records in memory.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod identity;
pub mod signer;
pub mod store;
pub mod submission;
pub mod types;
pub mod validation;

pub use api::HarvestApi;
pub use client::HarvestClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use identity::{Credentials, derive, validate_pin};
pub use signer::{SigningChain, SigningStrategy};
pub use store::RecordStore;
pub use submission::{SubmitOutcome, Submitted};
pub use types::{FarmerSession, LoggedIn, LoggedOut};
pub use validation::{HarvestForm, SignUpForm};

// Re-export shared types for convenience
pub use shared::client::{RecordFilter, RecordId, VerificationResponse};
pub use shared::{BlockchainStatus, DerivedIdentity, HarvestPayload, HarvestRecord, SubmissionResult};
