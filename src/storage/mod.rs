//! Storage layer for teller-cli
//!
//! Customers and accounts live only in process memory. Each registry
//! guards its collection with a lock and exposes atomic
//! check-then-insert operations, so the registries are safe to share even
//! though the application itself runs a single logical actor.

pub mod accounts;
pub mod customers;
pub mod init;

pub use accounts::{AccountRegistry, BalanceLookup};
pub use customers::{CustomerRegistry, SortCriterion};
pub use init::seed_sample_data;

use std::sync::Arc;

use crate::models::AccountNumberSequence;

/// Main storage coordinator that provides access to both registries
pub struct Storage {
    pub customers: CustomerRegistry,
    pub accounts: Arc<AccountRegistry>,
    sequence: AccountNumberSequence,
}

impl Storage {
    /// Create empty storage with account numbers starting at 1000
    pub fn new() -> Self {
        Self::with_sequence(AccountNumberSequence::new())
    }

    /// Create empty storage drawing account numbers from `sequence`
    pub fn with_sequence(sequence: AccountNumberSequence) -> Self {
        let accounts = Arc::new(AccountRegistry::new());
        let customers = CustomerRegistry::new(accounts.clone());
        Self {
            customers,
            accounts,
            sequence,
        }
    }

    /// The account number generator
    pub fn sequence(&self) -> &AccountNumberSequence {
        &self.sequence
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}
