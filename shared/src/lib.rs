//! Shared types for AgriDatum
//!
//! Wire DTOs for the harvest backend, the client-side harvest models,
//! and small time utilities used by both the client library and the CLI.

pub mod client;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    DerivedIdentity, HarvestPayload, HarvestRecord, RecordConversionError, SubmissionResult,
};
pub use response::{ApiResponse, BlockchainStatus, Pagination};
