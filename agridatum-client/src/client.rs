//! Farmer-facing harvest client.
//!
//! `HarvestClient` uses the typestate pattern so that submitting or
//! listing records without an open session does not compile:
//!
//! - **LoggedOut**: initial state. Call `login()` or `sign_up()`.
//! - **LoggedIn**: a farmer session is open. Call `submit()`,
//!   `reload_records()`, `records()`, or `logout()`.
//!
//! # Example
//!
//! ```no_run
//! use agridatum_client::{ClientConfig, Credentials, HarvestClient, HarvestForm};
//!
//! # async fn example() -> Result<(), agridatum_client::ClientError> {
//! let client = HarvestClient::new(ClientConfig::from_env()?)?;
//! let mut client = client.login(Credentials::new("+254700000001", "123456")).await?;
//!
//! let form = HarvestForm::new(
//!     Credentials::new("+254700000001", "123456"),
//!     "North Field - Section A",
//!     "Maize",
//!     Some(50.0),
//! );
//! let outcome = client.submit(&form).await;
//! assert!(outcome.success || outcome.error.is_some());
//! # Ok(())
//! # }
//! ```

use shared::DerivedIdentity;

use crate::api::HarvestApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::identity::Credentials;
use crate::store::RecordStore;
use crate::submission::{SubmitOutcome, submit_harvest};
use crate::types::{FarmerSession, LoggedIn, LoggedOut, SessionData, SessionState, StateMarker};
use crate::validation::{HarvestForm, SignUpForm, validate_login};

// ============================================================================
// Core HarvestClient Definition
// ============================================================================

#[derive(Debug)]
pub struct HarvestClient<S: SessionState = LoggedOut, H: HttpClient = NetworkHttpClient> {
    #[allow(dead_code)] // Used for typestate pattern at compile time
    pub(crate) marker: StateMarker<S>,
    pub(crate) api: HarvestApi<H>,
    pub(crate) session: SessionData,
    pub(crate) records: RecordStore,
    pub(crate) config: ClientConfig,
}

// ============================================================================
// Construction
// ============================================================================

impl HarvestClient<LoggedOut, NetworkHttpClient> {
    /// Creates a logged-out client talking to the configured backend.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        Ok(Self::with_http(config, http))
    }
}

impl<H: HttpClient> HarvestClient<LoggedOut, H> {
    /// Creates a logged-out client over a custom transport.
    pub fn with_http(config: ClientConfig, http: H) -> Self {
        Self {
            marker: StateMarker::new(),
            api: HarvestApi::new(http),
            session: SessionData::new(),
            records: RecordStore::new(),
            config,
        }
    }
}

// ============================================================================
// Common Methods (Available in All States)
// ============================================================================

impl<S: SessionState, H: HttpClient> HarvestClient<S, H> {
    /// Returns the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the backend API.
    pub fn api(&self) -> &HarvestApi<H> {
        &self.api
    }

    /// Derives the identity for credentials without touching the session.
    pub fn derive(&self, credentials: &Credentials) -> DerivedIdentity {
        credentials.derive()
    }

    /// Checks if a farmer session is open.
    pub fn is_logged_in(&self) -> bool {
        self.session.farmer().is_some()
    }

    /// Transforms the client to a new state (internal use only).
    pub(crate) fn transition<NewS: SessionState>(self) -> HarvestClient<NewS, H> {
        HarvestClient {
            marker: StateMarker::new(),
            api: self.api,
            session: self.session,
            records: self.records,
            config: self.config,
        }
    }
}

// ============================================================================
// LoggedOut State
// ============================================================================

impl<H: HttpClient> HarvestClient<LoggedOut, H> {
    /// Logs a farmer in and loads their records.
    ///
    /// There is no account lookup: the farmer id is derived from the
    /// credentials. A failed record load leaves the list empty and does
    /// not fail the login.
    pub async fn login(mut self, credentials: Credentials) -> ClientResult<HarvestClient<LoggedIn, H>> {
        validate_login(&credentials)?;
        let identity = credentials.derive();

        tracing::info!("Login successful for farmer {}", identity.farmer_id);
        self.session.open(FarmerSession {
            farmer_id: identity.farmer_id,
            phone_number: credentials.phone_number,
            full_name: None,
        });

        let mut client: HarvestClient<LoggedIn, H> = self.transition();
        client.reload_records().await;
        Ok(client)
    }

    /// Registers a farmer locally and opens a session with an empty list.
    ///
    /// Nothing is sent to the backend; the derived farmer id is the account.
    pub fn sign_up(mut self, form: SignUpForm) -> ClientResult<HarvestClient<LoggedIn, H>> {
        form.validate()?;
        let identity = form.credentials.derive();

        tracing::info!("Sign up successful for farmer {}", identity.farmer_id);
        self.session.open(FarmerSession {
            farmer_id: identity.farmer_id,
            phone_number: form.credentials.phone_number,
            full_name: Some(form.full_name),
        });
        self.records.clear();
        Ok(self.transition())
    }
}

// ============================================================================
// LoggedIn State
// ============================================================================

impl<H: HttpClient> HarvestClient<LoggedIn, H> {
    /// Returns the current farmer, or an error if no session is open.
    pub fn current_farmer(&self) -> ClientResult<&FarmerSession> {
        self.session
            .farmer()
            .ok_or_else(|| ClientError::InvalidState("No farmer session".into()))
    }

    /// Records shown to the farmer, newest first.
    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    /// Submits a harvest and, on success, puts the record at the top of the list.
    ///
    /// Takes `&mut self`, so a client handle runs one submission at a time.
    /// A form whose credentials derive a different farmer than the session's
    /// is rejected before any network call.
    pub async fn submit(&mut self, form: &HarvestForm) -> SubmitOutcome {
        let result = match self.check_form_owner(form) {
            Ok(()) => submit_harvest(&self.api, &self.config.signing, form).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(submitted) => self.records.prepend(submitted.record.clone()),
            Err(e) => tracing::error!("Submission error: {}", e),
        }

        result.into()
    }

    fn check_form_owner(&self, form: &HarvestForm) -> ClientResult<()> {
        form.validate()?;
        let farmer = self.current_farmer()?;
        if form.credentials.derive().farmer_id != farmer.farmer_id {
            tracing::warn!(
                "Rejected harvest for a farmer other than session {}",
                farmer.farmer_id
            );
            return Err(ClientError::validation(
                "These credentials do not match the logged-in farmer.",
            ));
        }
        Ok(())
    }

    /// Replaces the list with the backend's copy.
    ///
    /// Failures are logged and leave the list empty. Returns the number of records loaded.
    pub async fn reload_records(&mut self) -> usize {
        let farmer_id = match self.current_farmer() {
            Ok(farmer) => farmer.farmer_id.clone(),
            Err(e) => {
                tracing::error!("Cannot load records: {}", e);
                self.records.clear();
                return 0;
            }
        };

        tracing::info!("Loading records for farmer {}", farmer_id);
        match self
            .api
            .records_by_farmer(&farmer_id, self.config.record_limit, 0)
            .await
        {
            Ok(records) => {
                tracing::info!("Loaded {} records", records.len());
                self.records.replace_all(records);
            }
            Err(e) => {
                tracing::error!("Failed to load records: {}", e);
                self.records.clear();
            }
        }
        self.records.len()
    }

    /// Ends the session and discards the local record list.
    ///
    /// The backend's copy is untouched.
    pub fn logout(mut self) -> HarvestClient<LoggedOut, H> {
        tracing::info!("Logging out");
        self.session.clear();
        self.records.clear();
        self.transition()
    }
}
