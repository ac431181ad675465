//! Display formatting for terminal output
//!
//! Provides utilities for formatting customers and accounts for terminal
//! display.

pub mod account;
pub mod customer;

pub use account::{format_account_details, format_account_list, format_balance_line};
pub use customer::{format_customer_details, format_customer_list};
