//! Customer CLI commands
//!
//! Implements CLI commands for customer management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::customer::{format_customer_details, format_customer_list};
use crate::error::{TellerError, TellerResult};
use crate::models::{Customer, NationalId};
use crate::services::{AccountService, CustomerService, CustomerUpdate, NewCustomer};
use crate::storage::{SortCriterion, Storage};

/// Customer subcommands
#[derive(Subcommand)]
pub enum CustomerCommands {
    /// Register a new customer
    Add {
        /// First name
        first_name: String,
        /// Last name
        last_name: String,
        /// National ID (digits, mask optional: 111.111.111-11)
        national_id: NationalId,
        /// Secondary identity document
        #[arg(short, long = "secondary-id")]
        secondary_id: String,
        /// Address
        #[arg(short, long)]
        address: String,
    },
    /// Edit a customer
    Edit {
        /// National ID of the customer
        national_id: NationalId,
        /// New first name
        #[arg(long)]
        first_name: Option<String>,
        /// New last name
        #[arg(long)]
        last_name: Option<String>,
        /// New secondary identity document
        #[arg(short, long = "secondary-id")]
        secondary_id: Option<String>,
        /// New address
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Remove a customer and their account
    #[command(alias = "delete")]
    Remove {
        /// National ID of the customer
        national_id: NationalId,
    },
    /// Show customer details
    Show {
        /// National ID of the customer
        national_id: NationalId,
    },
    /// List all customers
    List {
        /// Sort by name, surname or balance
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Search customers by name or document
    Search {
        /// Text to look for
        term: String,
        /// Sort by name, surname or balance
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// List all customers sorted by a field
    Sort {
        /// name, surname or balance
        by: String,
    },
}

fn parse_criterion(s: &str) -> TellerResult<SortCriterion> {
    SortCriterion::parse(s).ok_or_else(|| {
        TellerError::Validation(format!(
            "Invalid sort field: '{}'. Valid fields: name, surname, balance",
            s
        ))
    })
}

fn sorted(
    service: &CustomerService<'_>,
    customers: Vec<Customer>,
    sort: Option<&str>,
) -> TellerResult<Vec<Customer>> {
    match sort {
        Some(by) => Ok(service.sort(parse_criterion(by)?, &customers)),
        None => Ok(customers),
    }
}

/// Handle a customer command
pub fn handle_customer_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CustomerCommands,
) -> TellerResult<()> {
    let service = CustomerService::new(storage);

    match cmd {
        CustomerCommands::Add {
            first_name,
            last_name,
            national_id,
            secondary_id,
            address,
        } => {
            let customer = service.register(NewCustomer {
                first_name,
                last_name,
                secondary_id,
                national_id: national_id.as_str().to_string(),
                address,
            })?;

            println!("Registered customer: {}", customer.full_name());
            println!("  National ID: {}", customer.national_id());
        }

        CustomerCommands::Edit {
            national_id,
            first_name,
            last_name,
            secondary_id,
            address,
        } => {
            let changes = CustomerUpdate {
                first_name,
                last_name,
                secondary_id,
                address,
            };

            if changes.is_empty() {
                println!(
                    "No changes specified. Use --first-name, --last-name, --secondary-id or --address."
                );
                return Ok(());
            }

            let updated = service.update(&national_id, changes)?;
            println!("Updated customer: {}", updated);
        }

        CustomerCommands::Remove { national_id } => {
            let customer = service.get(&national_id)?;
            let removed = service.delete(&national_id)?;

            println!("Removed customer: {}", customer.full_name());
            if removed > 0 {
                println!("  Accounts removed: {}", removed);
            }
        }

        CustomerCommands::Show { national_id } => {
            let customer = service.get(&national_id)?;
            let balance = AccountService::new(storage)
                .find_for_customer(&national_id)?
                .map(|account| account.balance());

            print!(
                "{}",
                format_customer_details(&customer, balance, &settings.currency_symbol)
            );
        }

        CustomerCommands::List { sort } => {
            let customers = sorted(&service, service.list()?, sort.as_deref())?;
            print!("{}", format_customer_list(&customers));
        }

        CustomerCommands::Search { term, sort } => {
            let customers = sorted(&service, service.search(&term)?, sort.as_deref())?;
            print!("{}", format_customer_list(&customers));
        }

        CustomerCommands::Sort { by } => {
            let criterion = parse_criterion(&by)?;
            let customers = service.sort(criterion, &service.list()?);
            print!("{}", format_customer_list(&customers));
        }
    }

    Ok(())
}
