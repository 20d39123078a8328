//! Collaborator contracts
//!
//! The dispatcher does not authenticate users or store calculations itself.
//! It calls out to three collaborators:
//!
//! - [`AccountService`]: signup, login, logout, profile lookup
//! - [`CalculationService`]: add, list and delete calculation records
//! - [`StoreStatusProvider`]: opaque diagnostics for status snapshots
//!
//! Results are opaque JSON values; the dispatcher only spreads them into a
//! [`HandlerOutcome`](crate::models::HandlerOutcome). Failures are
//! [`HandlerError`]s, which never escape the dispatcher.
//!
//! [`memory`] provides in-memory implementations over one shared database.

pub mod memory;
pub mod types;

pub use memory::{InMemoryAccounts, InMemoryCalculations, InMemoryStore, SharedDatabase, SimDatabase};
pub use types::{
    AuthenticationInfo, Calculation, CalculationKind, ContactInfo, HistoryFilters, Preferences,
    ProfileInfo, SignupRequest,
};

use serde_json::Value;
use thiserror::Error;

/// Failure raised by a collaborator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Account operations
pub trait AccountService {
    /// Create a user; returns the created-user result
    fn signup(&mut self, request: &SignupRequest) -> Result<Value, HandlerError>;

    /// Open a session; returns a token result
    fn login(&mut self, email: &str, password: &str) -> Result<Value, HandlerError>;

    /// Close a session. Returns the raw success flag.
    fn logout(&mut self, token: &str) -> bool;

    fn get_profile(&self, token: &str) -> Result<Value, HandlerError>;
}

/// Calculation record operations, all scoped to the session's user
pub trait CalculationService {
    fn add_calculation(
        &mut self,
        token: &str,
        calculation: &Calculation,
    ) -> Result<Value, HandlerError>;

    fn get_calculation_history(
        &self,
        token: &str,
        filters: &HistoryFilters,
    ) -> Result<Value, HandlerError>;

    fn delete_calculation(
        &mut self,
        token: &str,
        transaction_id: &str,
    ) -> Result<Value, HandlerError>;
}

/// Diagnostics source for status snapshots
pub trait StoreStatusProvider {
    fn status(&self) -> Value;
}

/// The collaborators a simulator dispatches to
pub struct Collaborators {
    pub accounts: Box<dyn AccountService>,
    pub calculations: Box<dyn CalculationService>,
    pub store: Box<dyn StoreStatusProvider>,
}

impl Collaborators {
    pub fn new(
        accounts: Box<dyn AccountService>,
        calculations: Box<dyn CalculationService>,
        store: Box<dyn StoreStatusProvider>,
    ) -> Self {
        Self {
            accounts,
            calculations,
            store,
        }
    }

    /// In-memory collaborators sharing a fresh database
    pub fn in_memory() -> Self {
        Self::over_database(SharedDatabase::default())
    }

    /// In-memory collaborators over an existing database
    ///
    /// Keep a clone of `db` to inspect what the handlers stored.
    pub fn over_database(db: SharedDatabase) -> Self {
        Self::new(
            Box::new(InMemoryAccounts::new(db.clone())),
            Box::new(InMemoryCalculations::new(db.clone())),
            Box::new(InMemoryStore::new(db)),
        )
    }

    /// Replace the account service, keeping the others
    pub fn with_accounts(mut self, accounts: Box<dyn AccountService>) -> Self {
        self.accounts = accounts;
        self
    }

    /// Replace the calculation service, keeping the others
    pub fn with_calculations(mut self, calculations: Box<dyn CalculationService>) -> Self {
        self.calculations = calculations;
        self
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("db_status", &self.store.status())
            .finish_non_exhaustive()
    }
}
