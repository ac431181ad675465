//! teller-cli - Terminal bank teller for customers and their accounts
//!
//! This library provides the core functionality for the teller-cli
//! application: customer records, checking and investment accounts with
//! their deposit/withdraw/interest rules, and the registries that keep
//! customers and accounts consistent with each other.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (customers, accounts, identifiers, amounts)
//! - `storage`: In-memory registries and sample data
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: Command handlers and the interactive shell
//!
//! # Example
//!
//! ```rust
//! use teller_cli::models::NationalId;
//! use teller_cli::services::{AccountService, OpenAccount};
//! use teller_cli::storage::{init::seed_sample_data, Storage};
//!
//! let storage = Storage::new();
//! seed_sample_data(&storage).unwrap();
//!
//! let amanda = NationalId::parse("111.111.111-11").unwrap();
//! let account = AccountService::new(&storage).withdraw(&amanda, 1500.0).unwrap();
//! assert_eq!(account.balance(), -500.0);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::TellerError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber
///
/// Logs go to stderr. `RUST_LOG` overrides the default `teller_cli=warn`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("teller_cli=warn"));

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();

        tracing::debug!("tracing initialized");
    });
}
