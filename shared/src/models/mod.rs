//! Data models
//!
//! Client-side harvest types. Field names serialize as camelCase; the
//! backend's snake_case rows live in [`crate::client`] and are converted
//! at the boundary.

pub mod harvest;

// Re-exports
pub use harvest::*;
