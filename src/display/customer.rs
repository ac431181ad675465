//! Customer display formatting
//!
//! Renders customers as tables for list/search/sort output and as a
//! detail block for `customer show`.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::money::format_amount;
use crate::models::Customer;

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Surname")]
    surname: String,
    #[tabled(rename = "National ID")]
    national_id: String,
    #[tabled(rename = "Secondary ID")]
    secondary_id: String,
    #[tabled(rename = "Address")]
    address: String,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.first_name.clone(),
            surname: customer.last_name.clone(),
            national_id: customer.national_id().to_string(),
            secondary_id: customer.secondary_id.clone(),
            address: customer.address.clone(),
        }
    }
}

/// Format a list of customers as a table
pub fn format_customer_list(customers: &[Customer]) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let rows: Vec<CustomerRow> = customers.iter().map(CustomerRow::from).collect();
    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output
}

/// Format a single customer's details
///
/// `balance` is the customer's account balance, if they have an account.
pub fn format_customer_details(customer: &Customer, balance: Option<f64>, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Customer: {}\n", customer.full_name()));
    output.push_str(&format!("  National ID:  {}\n", customer.national_id()));
    output.push_str(&format!("  Secondary ID: {}\n", customer.secondary_id));
    output.push_str(&format!("  Address:      {}\n", customer.address));
    output.push('\n');

    match balance {
        Some(balance) => {
            output.push_str(&format!("  Balance:      {}\n", format_amount(balance, symbol)));
        }
        None => output.push_str("  Balance:      (no account)\n"),
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        customer.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        customer.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}
