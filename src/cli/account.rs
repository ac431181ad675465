//! Account CLI commands
//!
//! Implements CLI commands for account management. Accounts are addressed
//! by their owner's national ID.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::account::{format_account_details, format_account_list, format_balance_line};
use crate::error::{TellerError, TellerResult};
use crate::models::money::{format_amount, parse_amount};
use crate::models::{AccountKind, AccountType, NationalId};
use crate::services::{AccountService, OpenAccount};
use crate::storage::Storage;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open an account for an existing customer
    #[command(alias = "open")]
    Link {
        /// National ID of the owner
        national_id: NationalId,
        /// Account type (checking, investment)
        #[arg(short = 't', long, default_value = "checking")]
        account_type: String,
        /// Opening deposit (e.g., "1.000,00" or "1000.00")
        #[arg(short, long, default_value = "0", value_parser = parse_amount, allow_hyphen_values = true)]
        initial: f64,
        /// Overdraft limit (checking)
        #[arg(short, long, default_value = "0", value_parser = parse_amount, allow_hyphen_values = true)]
        limit: f64,
        /// Minimum balance (investment)
        #[arg(long, default_value = "0", value_parser = parse_amount, allow_hyphen_values = true)]
        minimum_balance: f64,
        /// Minimum deposit (investment)
        #[arg(long, default_value = "0", value_parser = parse_amount, allow_hyphen_values = true)]
        minimum_deposit: f64,
    },
    /// Show a customer's account
    Show {
        /// National ID of the owner
        national_id: NationalId,
    },
    /// List all accounts
    List,
    /// Deposit into a customer's account
    Deposit {
        /// National ID of the owner
        national_id: NationalId,
        /// Amount (e.g., "1.234,56")
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: f64,
    },
    /// Withdraw from a customer's account
    Withdraw {
        /// National ID of the owner
        national_id: NationalId,
        /// Amount (e.g., "1.234,56")
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: f64,
    },
    /// Apply the account's interest rate to its balance
    Accrue {
        /// National ID of the owner
        national_id: NationalId,
    },
}

fn account_kind(
    account_type: &str,
    limit: f64,
    minimum_balance: f64,
    minimum_deposit: f64,
) -> TellerResult<AccountKind> {
    let account_type = AccountType::parse(account_type).ok_or_else(|| {
        TellerError::Validation(format!(
            "Invalid account type: '{}'. Valid types: checking, investment",
            account_type
        ))
    })?;

    Ok(match account_type {
        AccountType::Checking => AccountKind::Checking {
            overdraft_limit: limit,
        },
        AccountType::Investment => AccountKind::Investment {
            minimum_balance,
            minimum_deposit,
        },
    })
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    cmd: AccountCommands,
) -> TellerResult<()> {
    let service = AccountService::new(storage).with_policy(settings.underfunded_policy);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        AccountCommands::Link {
            national_id,
            account_type,
            initial,
            limit,
            minimum_balance,
            minimum_deposit,
        } => {
            let kind = account_kind(&account_type, limit, minimum_balance, minimum_deposit)?;
            let account = service.link(
                &national_id,
                OpenAccount {
                    initial_deposit: initial,
                    kind,
                },
            )?;

            println!("Opened {} account #{}", account.account_type(), account.number());
            println!("  Owner:   {}", account.owner());
            println!("  Balance: {}", format_amount(account.balance(), symbol));
            if let Some(rejection) = account.opening_rejection() {
                println!("  Opening deposit refused: {}", rejection);
            }
        }

        AccountCommands::Show { national_id } => {
            let summary = service.summary_for_customer(&national_id)?;
            print!("{}", format_account_details(&summary, symbol));
        }

        AccountCommands::List => {
            let summaries = service.list()?;
            print!("{}", format_account_list(&summaries, symbol));
        }

        AccountCommands::Deposit {
            national_id,
            amount,
        } => {
            let account = service.deposit(&national_id, amount)?;
            println!("Deposited {}", format_amount(amount, symbol));
            println!("{}", format_balance_line(&account, symbol));
        }

        AccountCommands::Withdraw {
            national_id,
            amount,
        } => {
            let account = service.withdraw(&national_id, amount)?;
            println!("Withdrew {}", format_amount(amount, symbol));
            println!("{}", format_balance_line(&account, symbol));
        }

        AccountCommands::Accrue { national_id } => {
            let account = service.accrue(&national_id)?;
            println!("Interest applied");
            println!("{}", format_balance_line(&account, symbol));
        }
    }

    Ok(())
}
