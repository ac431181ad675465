//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod customer;
pub mod shell;

use clap::Subcommand;

use crate::config::{Settings, TellerPaths};
use crate::error::TellerResult;
use crate::storage::Storage;

pub use account::{handle_account_command, AccountCommands};
pub use customer::{handle_customer_command, CustomerCommands};
pub use shell::run_shell;

/// Commands available both one-shot and inside the shell
#[derive(Subcommand)]
pub enum Commands {
    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Show current configuration and paths
    Config,
}

/// Everything a command needs to run
pub struct Context<'a> {
    pub storage: &'a Storage,
    pub settings: &'a Settings,
    pub paths: &'a TellerPaths,
}

/// Run one command
pub fn dispatch(ctx: &Context<'_>, cmd: Commands) -> TellerResult<()> {
    match cmd {
        Commands::Customer(cmd) => handle_customer_command(ctx.storage, ctx.settings, cmd),
        Commands::Account(cmd) => handle_account_command(ctx.storage, ctx.settings, cmd),
        Commands::Config => {
            print_config(ctx.paths, ctx.settings);
            Ok(())
        }
    }
}

fn print_config(paths: &TellerPaths, settings: &Settings) {
    println!("teller-cli Configuration");
    println!("========================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:      {}", settings.currency_symbol);
    println!("  Underfunded accounts: {:?}", settings.underfunded_policy);
    println!("  Seed sample data:     {}", settings.seed_sample_data);
    println!("  First account number: {}", settings.first_account_number);
}
