//! Customer model
//!
//! A bank customer, identified by their national ID document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use super::ids::NationalId;

/// A bank customer
///
/// Two customers are equal iff their national IDs are equal; every other
/// field may change without affecting identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Secondary identity document
    pub secondary_id: String,

    /// Free-text address
    pub address: String,

    /// Primary key, fixed at registration
    national_id: NationalId,

    /// When the customer was registered
    pub created_at: DateTime<Utc>,

    /// When the customer was last modified
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Create a new customer
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        secondary_id: impl Into<String>,
        national_id: NationalId,
        address: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            secondary_id: secondary_id.into(),
            address: address.into(),
            national_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn national_id(&self) -> &NationalId {
        &self.national_id
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.touch();
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
        self.touch();
    }

    pub fn set_secondary_id(&mut self, secondary_id: impl Into<String>) {
        self.secondary_id = secondary_id.into();
        self.touch();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = address.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Natural ordering: first name, ascending
    ///
    /// Kept separate from `Ord` because equality is by national ID.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        self.first_name.cmp(&other.first_name)
    }

    /// Check the term against names (case-insensitive) and documents
    /// (case-sensitive)
    pub fn matches(&self, term: &str) -> bool {
        let term_lower = term.to_lowercase();
        self.first_name.to_lowercase().contains(&term_lower)
            || self.last_name.to_lowercase().contains(&term_lower)
            || self.secondary_id.contains(term)
            || self.national_id.contains(term)
    }

    /// Validate the customer
    pub fn validate(&self) -> Result<(), CustomerValidationError> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("secondary ID", &self.secondary_id),
            ("address", &self.address),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(CustomerValidationError::EmptyField(field));
            }
        }

        Ok(())
    }
}

impl PartialEq for Customer {
    fn eq(&self, other: &Self) -> bool {
        self.national_id == other.national_id
    }
}

impl Eq for Customer {}

impl Hash for Customer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.national_id.hash(state);
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (ID: {})",
            self.first_name, self.last_name, self.national_id
        )
    }
}

/// Validation errors for customers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerValidationError {
    EmptyField(&'static str),
}

impl fmt::Display for CustomerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "Customer {} cannot be empty", field),
        }
    }
}

impl std::error::Error for CustomerValidationError {}
