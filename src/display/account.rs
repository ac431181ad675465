//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::money::format_amount;
use crate::models::{Account, AccountKind};
use crate::services::account::AccountSummary;

fn owner_name(summary: &AccountSummary) -> String {
    summary
        .owner
        .as_ref()
        .map(|c| c.full_name())
        .unwrap_or_else(|| "(unknown)".to_string())
}

/// Format a list of accounts with balances as a table
pub fn format_account_list(summaries: &[AccountSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No accounts found.".to_string();
    }

    let owners: Vec<String> = summaries.iter().map(owner_name).collect();
    let balances: Vec<String> = summaries
        .iter()
        .map(|s| format_amount(s.account.balance(), symbol))
        .collect();

    let owner_width = owners.iter().map(|o| o.chars().count()).max().unwrap_or(5).max(5);
    let balance_width = balances.iter().map(|b| b.chars().count()).max().unwrap_or(7).max(7);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:<10}  {:<owner_width$}  {:>balance_width$}\n",
        "Number",
        "Type",
        "Owner",
        "Balance",
        owner_width = owner_width,
        balance_width = balance_width,
    ));

    output.push_str(&format!(
        "{:->6}  {:-<10}  {:-<owner_width$}  {:->balance_width$}\n",
        "",
        "",
        "",
        "",
        owner_width = owner_width,
        balance_width = balance_width,
    ));

    for ((summary, owner), balance) in summaries.iter().zip(&owners).zip(&balances) {
        output.push_str(&format!(
            "{:>6}  {:<10}  {:<owner_width$}  {:>balance_width$}\n",
            summary.account.number().to_string(),
            summary.account.account_type().to_string(),
            owner,
            balance,
            owner_width = owner_width,
            balance_width = balance_width,
        ));
    }

    output
}

/// Format a single account's details
pub fn format_account_details(summary: &AccountSummary, symbol: &str) -> String {
    let account = &summary.account;

    let mut output = String::new();

    output.push_str(&format!(
        "{} Account #{}\n",
        account.account_type(),
        account.number()
    ));
    output.push_str(&format!("  Owner:            {}\n", owner_name(summary)));
    output.push_str(&format!("  National ID:      {}\n", account.owner()));
    output.push_str(&format!(
        "  Balance:          {}\n",
        format_amount(account.balance(), symbol)
    ));

    match *account.kind() {
        AccountKind::Checking { overdraft_limit } => {
            output.push_str(&format!(
                "  Overdraft Limit:  {}\n",
                format_amount(overdraft_limit, symbol)
            ));
        }
        AccountKind::Investment {
            minimum_balance,
            minimum_deposit,
        } => {
            output.push_str(&format!(
                "  Minimum Balance:  {}\n",
                format_amount(minimum_balance, symbol)
            ));
            output.push_str(&format!(
                "  Minimum Deposit:  {}\n",
                format_amount(minimum_deposit, symbol)
            ));
        }
    }

    if let Some(rejection) = account.opening_rejection() {
        output.push('\n');
        output.push_str(&format!("  Opening deposit refused: {}\n", rejection));
    }

    output
}

/// One-line result of an operation, e.g. after a deposit
pub fn format_balance_line(account: &Account, symbol: &str) -> String {
    format!(
        "Account #{} balance: {}",
        account.number(),
        format_amount(account.balance(), symbol)
    )
}
