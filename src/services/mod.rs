//! Service layer for teller-cli
//!
//! The service layer provides business logic on top of the registries,
//! handling validation, uniqueness and cross-entity operations such as
//! cascading deletes.

pub mod account;
pub mod customer;

pub use account::{AccountService, AccountSummary, OpenAccount};
pub use customer::{CustomerService, CustomerUpdate, NewCustomer};
