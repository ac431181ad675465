//! Core data models for teller-cli
//!
//! This module contains the data structures that represent the banking
//! domain: customers, accounts and the value objects identifying them.

pub mod account;
pub mod customer;
pub mod ids;
pub mod money;
pub mod sequence;

pub use account::{Account, AccountKind, AccountType, RejectedOperation};
pub use customer::Customer;
pub use ids::{AccountNumber, NationalId};
pub use sequence::AccountNumberSequence;
