//! Type markers for HarvestClient's typestate pattern.
//!
//! This module defines the session state markers used to enforce
//! correct usage of HarvestClient at compile time.

use std::marker::PhantomData;

// ============================================================================
// State Markers
// ============================================================================

/// Logged-out state - no farmer session, empty record list.
///
/// Available transitions:
/// - `login()` or `sign_up()` -> LoggedIn
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggedOut;

/// Logged-in state - a farmer session is open.
///
/// Available operations:
/// - `submit()`, `reload_records()`, `records()`
/// - `logout()` -> LoggedOut
#[derive(Debug, Clone, Copy)]
pub struct LoggedIn;

/// Sealed trait for session states.
pub trait SessionState: private::Sealed + Send + Sync + 'static {}
impl SessionState for LoggedOut {}
impl SessionState for LoggedIn {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::LoggedOut {}
    impl Sealed for super::LoggedIn {}
}

// ============================================================================
// Session Data
// ============================================================================

/// The farmer a session belongs to.
///
/// Holds no PIN and no seed; those are derived again per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmerSession {
    pub farmer_id: String,
    pub phone_number: String,
    /// Only known after sign-up
    pub full_name: Option<String>,
}

/// Session data stored in memory during the client's lifecycle.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    farmer: Option<FarmerSession>,
}

impl SessionData {
    /// Creates a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the session for a farmer.
    pub fn open(&mut self, farmer: FarmerSession) {
        self.farmer = Some(farmer);
    }

    /// Clears the session data on logout.
    pub fn clear(&mut self) {
        self.farmer = None;
    }

    /// Returns the current farmer if a session is open.
    pub fn farmer(&self) -> Option<&FarmerSession> {
        self.farmer.as_ref()
    }
}

// ============================================================================
// Phantom State Wrapper
// ============================================================================

/// Internal wrapper to hold the phantom state marker.
#[derive(Debug)]
pub(crate) struct StateMarker<S> {
    pub(crate) _state: PhantomData<S>,
}

impl<S> StateMarker<S> {
    pub(crate) fn new() -> Self {
        Self {
            _state: PhantomData,
        }
    }
}

impl<S> Clone for StateMarker<S> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<S> Default for StateMarker<S> {
    fn default() -> Self {
        Self::new()
    }
}
