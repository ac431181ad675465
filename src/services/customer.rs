//! Customer service
//!
//! Provides business logic for customer registration, editing, lookup and
//! deletion (which cascades to the customer's accounts).

use crate::error::{TellerError, TellerResult};
use crate::models::{Customer, NationalId};
use crate::storage::{SortCriterion, Storage};

/// Service for customer management
pub struct CustomerService<'a> {
    storage: &'a Storage,
}

/// Raw field values for a new customer
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub secondary_id: String,
    pub national_id: String,
    pub address: String,
}

/// Fields to change on an existing customer; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub secondary_id: Option<String>,
    pub address: Option<String>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.secondary_id.is_none()
            && self.address.is_none()
    }
}

impl<'a> CustomerService<'a> {
    /// Create a new customer service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new customer
    ///
    /// Every field is required; the national ID must not belong to an
    /// existing customer.
    pub fn register(&self, input: NewCustomer) -> TellerResult<Customer> {
        let national_id = NationalId::parse(&input.national_id)?;

        let customer = Customer::new(
            input.first_name.trim(),
            input.last_name.trim(),
            input.secondary_id.trim(),
            national_id,
            input.address.trim(),
        );

        customer
            .validate()
            .map_err(|e| TellerError::Validation(e.to_string()))?;

        if !self.storage.customers.add_if_absent(customer.clone())? {
            tracing::warn!(national_id = %customer.national_id(), "duplicate customer rejected");
            return Err(TellerError::Duplicate {
                entity_type: "Customer",
                identifier: customer.national_id().to_string(),
            });
        }

        tracing::info!(national_id = %customer.national_id(), "customer registered");
        Ok(customer)
    }

    /// Get a customer by national ID
    pub fn find(&self, national_id: &NationalId) -> TellerResult<Option<Customer>> {
        tracing::debug!(%national_id, "customer lookup");
        self.storage.customers.find_by_id(national_id)
    }

    /// Get a customer by national ID, failing if absent
    pub fn get(&self, national_id: &NationalId) -> TellerResult<Customer> {
        self.find(national_id)?
            .ok_or_else(|| TellerError::customer_not_found(national_id.to_string()))
    }

    /// Get all customers, in registration order
    pub fn list(&self) -> TellerResult<Vec<Customer>> {
        self.storage.customers.list()
    }

    /// Search customers by name or document
    pub fn search(&self, term: &str) -> TellerResult<Vec<Customer>> {
        self.storage.customers.search(term)
    }

    /// Sorted copy of `customers`
    pub fn sort(&self, criterion: SortCriterion, customers: &[Customer]) -> Vec<Customer> {
        self.storage.customers.sort(criterion, customers)
    }

    /// Edit a customer's mutable fields
    pub fn update(&self, national_id: &NationalId, changes: CustomerUpdate) -> TellerResult<Customer> {
        let mut customer = self.get(national_id)?;

        if let Some(first_name) = changes.first_name {
            customer.set_first_name(first_name.trim());
        }
        if let Some(last_name) = changes.last_name {
            customer.set_last_name(last_name.trim());
        }
        if let Some(secondary_id) = changes.secondary_id {
            customer.set_secondary_id(secondary_id.trim());
        }
        if let Some(address) = changes.address {
            customer.set_address(address.trim());
        }

        customer
            .validate()
            .map_err(|e| TellerError::Validation(e.to_string()))?;

        if !self.storage.customers.update(customer.clone())? {
            return Err(TellerError::customer_not_found(national_id.to_string()));
        }

        tracing::info!(%national_id, "customer updated");
        Ok(customer)
    }

    /// Delete a customer together with their accounts
    ///
    /// Accounts are purged first so no account is ever left pointing at a
    /// missing customer. Returns the number of accounts removed.
    pub fn delete(&self, national_id: &NationalId) -> TellerResult<usize> {
        let customer = self.get(national_id)?;

        let removed_accounts = self.storage.accounts.remove_all_for_customer(&customer)?;

        if !self.storage.customers.remove(&customer)? {
            return Err(TellerError::customer_not_found(national_id.to_string()));
        }

        tracing::info!(%national_id, removed_accounts, "customer deleted");
        Ok(removed_accounts)
    }
}
