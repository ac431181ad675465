//! Account model
//!
//! Represents bank accounts and the rules each kind of account applies to
//! deposits, withdrawals and interest accrual.
//!
//! Every kind shares the same base rule: amounts must be strictly
//! positive. On top of that:
//!
//! - **Checking** lets the balance go negative down to `-overdraft_limit`
//!   and accrues 1% per call.
//! - **Investment** refuses deposits below `minimum_deposit`, refuses
//!   withdrawals that would leave less than `minimum_balance` and accrues
//!   2% per call.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountNumber, NationalId};
use super::money::format_amount;

/// Balance multiplier applied on each checking accrual (1%)
pub const CHECKING_ACCRUAL_FACTOR: f64 = 1.01;

/// Balance multiplier applied on each investment accrual (2%)
pub const INVESTMENT_ACCRUAL_FACTOR: f64 = 1.02;

/// Type of bank account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Checking account with an overdraft limit
    Checking,
    /// Investment account with minimum balance and deposit rules
    Investment,
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" | "current" => Some(Self::Checking),
            "investment" | "invest" => Some(Self::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "Checking"),
            Self::Investment => write!(f, "Investment"),
        }
    }
}

/// Per-kind parameters of an account
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AccountKind {
    Checking {
        /// Largest negative balance magnitude allowed
        overdraft_limit: f64,
    },
    Investment {
        /// Floor a withdrawal may not cross
        minimum_balance: f64,
        /// Smallest amount accepted per deposit
        minimum_deposit: f64,
    },
}

impl AccountKind {
    pub fn account_type(&self) -> AccountType {
        match self {
            Self::Checking { .. } => AccountType::Checking,
            Self::Investment { .. } => AccountType::Investment,
        }
    }

    /// Multiplier applied to the balance on each accrual
    pub fn accrual_factor(&self) -> f64 {
        match self {
            Self::Checking { .. } => CHECKING_ACCRUAL_FACTOR,
            Self::Investment { .. } => INVESTMENT_ACCRUAL_FACTOR,
        }
    }

    /// All parameters must be finite and non-negative
    pub fn validate(&self) -> Result<(), AccountValidationError> {
        let params: Vec<(&'static str, f64)> = match *self {
            Self::Checking { overdraft_limit } => vec![("overdraft limit", overdraft_limit)],
            Self::Investment {
                minimum_balance,
                minimum_deposit,
            } => vec![
                ("minimum balance", minimum_balance),
                ("minimum deposit", minimum_deposit),
            ],
        };

        for (name, value) in params {
            if !value.is_finite() || value < 0.0 {
                return Err(AccountValidationError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

/// Why an account refused an operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RejectedOperation {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("amount must be a finite number")]
    NonFiniteAmount,

    #[error("deposit of {amount:.2} is below the minimum deposit of {minimum:.2}")]
    BelowMinimumDeposit { amount: f64, minimum: f64 },

    #[error("withdrawal of {amount:.2} would exceed the overdraft limit of {limit:.2}")]
    OverdraftExceeded { amount: f64, limit: f64 },

    #[error("withdrawal of {amount:.2} would leave less than the minimum balance of {minimum:.2}")]
    BelowMinimumBalance { amount: f64, minimum: f64 },
}

/// A bank account linked to one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    number: AccountNumber,
    /// National ID of the owning customer
    owner: NationalId,
    balance: f64,
    kind: AccountKind,
    /// Set when the opening deposit was refused
    #[serde(default, skip_serializing_if = "Option::is_none")]
    opening_rejection: Option<RejectedOperation>,
}

impl Account {
    /// Open an account and run a non-zero initial amount through `deposit`
    ///
    /// A zero initial amount opens an empty account with nothing to refuse.
    /// If the account's rules refuse the initial amount, the account is
    /// still returned, with a zero balance and the refusal recorded in
    /// [`Account::opening_rejection`]. The caller decides whether to keep it.
    pub fn open(
        number: AccountNumber,
        owner: NationalId,
        initial_deposit: f64,
        kind: AccountKind,
    ) -> Self {
        let mut account = Self {
            number,
            owner,
            balance: 0.0,
            kind,
            opening_rejection: None,
        };
        if initial_deposit != 0.0 {
            account.opening_rejection = account.try_deposit(initial_deposit).err();
        }
        account
    }

    /// Open a checking account
    pub fn checking(
        number: AccountNumber,
        owner: NationalId,
        initial_deposit: f64,
        overdraft_limit: f64,
    ) -> Self {
        Self::open(
            number,
            owner,
            initial_deposit,
            AccountKind::Checking { overdraft_limit },
        )
    }

    /// Open an investment account
    pub fn investment(
        number: AccountNumber,
        owner: NationalId,
        initial_deposit: f64,
        minimum_balance: f64,
        minimum_deposit: f64,
    ) -> Self {
        Self::open(
            number,
            owner,
            initial_deposit,
            AccountKind::Investment {
                minimum_balance,
                minimum_deposit,
            },
        )
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn owner(&self) -> &NationalId {
        &self.owner
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    pub fn account_type(&self) -> AccountType {
        self.kind.account_type()
    }

    pub fn opening_rejection(&self) -> Option<RejectedOperation> {
        self.opening_rejection
    }

    /// Whether this account belongs to the customer with `national_id`
    pub fn is_owned_by(&self, national_id: &NationalId) -> bool {
        &self.owner == national_id
    }

    /// Deposit `amount`, returning the rule that refused it if any
    pub fn try_deposit(&mut self, amount: f64) -> Result<(), RejectedOperation> {
        check_amount(amount)?;

        if let AccountKind::Investment {
            minimum_deposit, ..
        } = self.kind
        {
            if amount < minimum_deposit {
                return Err(RejectedOperation::BelowMinimumDeposit {
                    amount,
                    minimum: minimum_deposit,
                });
            }
        }

        let new_balance = self.balance + amount;
        if !new_balance.is_finite() {
            return Err(RejectedOperation::NonFiniteAmount);
        }

        self.balance = new_balance;
        Ok(())
    }

    /// Withdraw `amount`, returning the rule that refused it if any
    pub fn try_withdraw(&mut self, amount: f64) -> Result<(), RejectedOperation> {
        check_amount(amount)?;

        let new_balance = self.balance - amount;

        match self.kind {
            AccountKind::Checking { overdraft_limit } => {
                if !new_balance.is_finite() || new_balance < -overdraft_limit {
                    return Err(RejectedOperation::OverdraftExceeded {
                        amount,
                        limit: overdraft_limit,
                    });
                }
            }
            AccountKind::Investment {
                minimum_balance, ..
            } => {
                if !new_balance.is_finite() || new_balance < minimum_balance {
                    return Err(RejectedOperation::BelowMinimumBalance {
                        amount,
                        minimum: minimum_balance,
                    });
                }
            }
        }

        self.balance = new_balance;
        Ok(())
    }

    /// Deposit `amount`; false if a rule refused it (balance unchanged)
    pub fn deposit(&mut self, amount: f64) -> bool {
        self.try_deposit(amount).is_ok()
    }

    /// Withdraw `amount`; false if a rule refused it (balance unchanged)
    pub fn withdraw(&mut self, amount: f64) -> bool {
        self.try_withdraw(amount).is_ok()
    }

    /// Multiply the balance by the kind's accrual factor
    pub fn accrue_interest(&mut self) {
        let accrued = self.balance * self.kind.accrual_factor();
        if accrued.is_finite() {
            self.balance = accrued;
        }
    }
}

/// Shared precondition of deposits and withdrawals
fn check_amount(amount: f64) -> Result<(), RejectedOperation> {
    if !amount.is_finite() {
        return Err(RejectedOperation::NonFiniteAmount);
    }
    if amount <= 0.0 {
        return Err(RejectedOperation::NonPositiveAmount);
    }
    Ok(())
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Account #{} (Owner: {}, Balance: {}",
            self.account_type(),
            self.number,
            self.owner,
            format_amount(self.balance, "")
        )?;
        match self.kind {
            AccountKind::Checking { overdraft_limit } => {
                write!(f, ", Limit: {})", format_amount(overdraft_limit, ""))
            }
            AccountKind::Investment {
                minimum_balance, ..
            } => write!(f, ", Minimum: {})", format_amount(minimum_balance, "")),
        }
    }
}

/// Validation errors for account parameters
#[derive(Debug, Clone, PartialEq)]
pub enum AccountValidationError {
    InvalidParameter { name: &'static str, value: f64 },
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, value } => {
                write!(f, "Account {} must be zero or positive (got {})", name, value)
            }
        }
    }
}

impl std::error::Error for AccountValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::money::round_cents;

    fn owner() -> NationalId {
        NationalId::parse("11111111111").unwrap()
    }

    fn checking(initial: f64, limit: f64) -> Account {
        Account::checking(AccountNumber::new(1000), owner(), initial, limit)
    }

    fn investment(initial: f64, min_balance: f64, min_deposit: f64) -> Account {
        Account::investment(
            AccountNumber::new(1001),
            owner(),
            initial,
            min_balance,
            min_deposit,
        )
    }

    #[test]
    fn test_open_checking() {
        let account = checking(1000.0, 500.0);
        assert_eq!(account.number().value(), 1000);
        assert_eq!(account.balance(), 1000.0);
        assert_eq!(account.account_type(), AccountType::Checking);
        assert!(account.opening_rejection().is_none());
        assert!(account.is_owned_by(&owner()));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        for mut account in [checking(1000.0, 500.0), investment(5000.0, 1000.0, 100.0)] {
            let before = account.balance();
            for amount in [0.0, -1.0, -1000.0] {
                assert!(!account.withdraw(amount));
                assert!(!account.deposit(amount));
                assert_eq!(account.balance(), before);
            }
            assert_eq!(
                account.try_withdraw(0.0),
                Err(RejectedOperation::NonPositiveAmount)
            );
        }
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        for mut account in [checking(100.0, 0.0), investment(5000.0, 1000.0, 100.0)] {
            for amount in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
                assert_eq!(
                    account.try_deposit(amount),
                    Err(RejectedOperation::NonFiniteAmount)
                );
                assert_eq!(
                    account.try_withdraw(amount),
                    Err(RejectedOperation::NonFiniteAmount)
                );
            }
            let before = account.balance();
            assert!(before.is_finite());

            // Repeated huge withdrawals must still respect the floor
            assert!(!account.withdraw(1e9));
            assert_eq!(account.balance(), before);
        }
    }

    #[test]
    fn test_deposit_overflow_rejected() {
        let mut account = checking(f64::MAX, 0.0);
        assert_eq!(
            account.try_deposit(f64::MAX),
            Err(RejectedOperation::NonFiniteAmount)
        );
        assert_eq!(account.balance(), f64::MAX);
    }

    #[test]
    fn test_zero_opening_records_no_rejection() {
        let account = checking(0.0, 500.0);
        assert_eq!(account.balance(), 0.0);
        assert!(account.opening_rejection().is_none());

        let account = investment(0.0, 0.0, 100.0);
        assert_eq!(account.balance(), 0.0);
        assert!(account.opening_rejection().is_none());
    }

    #[test]
    fn test_checking_overdraft_boundary_is_inclusive() {
        let mut account = checking(1000.0, 500.0);
        assert!(account.withdraw(1500.0));
        assert_eq!(account.balance(), -500.0);
        assert!(!account.withdraw(0.01));
        assert_eq!(account.balance(), -500.0);
    }

    #[test]
    fn test_checking_overdraft_exceeded() {
        let mut account = checking(1000.0, 500.0);
        assert_eq!(
            account.try_withdraw(1501.0),
            Err(RejectedOperation::OverdraftExceeded {
                amount: 1501.0,
                limit: 500.0
            })
        );
        assert_eq!(account.balance(), 1000.0);
    }

    #[test]
    fn test_checking_partial_overdraft() {
        let mut account = checking(1000.0, 500.0);
        assert!(account.withdraw(1400.0));
        assert_eq!(account.balance(), -400.0);
        assert!(account.withdraw(1.0));
        assert_eq!(account.balance(), -401.0);
        assert!(account.balance() >= -500.0);
    }

    #[test]
    fn test_checking_with_zero_limit() {
        let mut account = checking(100.0, 0.0);
        assert!(!account.withdraw(100.01));
        assert!(account.withdraw(100.0));
        assert_eq!(account.balance(), 0.0);
    }

    #[test]
    fn test_investment_underfunded_opening() {
        let mut account = investment(50.0, 0.0, 100.0);
        assert_eq!(account.balance(), 0.0);
        assert_eq!(
            account.opening_rejection(),
            Some(RejectedOperation::BelowMinimumDeposit {
                amount: 50.0,
                minimum: 100.0
            })
        );

        assert!(account.deposit(150.0));
        assert_eq!(account.balance(), 150.0);
    }

    #[test]
    fn test_investment_minimum_deposit() {
        let mut account = investment(5000.0, 1000.0, 100.0);
        assert!(!account.deposit(99.99));
        assert_eq!(account.balance(), 5000.0);
        assert!(account.deposit(100.0));
        assert_eq!(account.balance(), 5100.0);
    }

    #[test]
    fn test_investment_minimum_balance() {
        let mut account = investment(5000.0, 1000.0, 100.0);
        assert!(account.withdraw(4000.0));
        assert_eq!(account.balance(), 1000.0);
        assert_eq!(
            account.try_withdraw(1.0),
            Err(RejectedOperation::BelowMinimumBalance {
                amount: 1.0,
                minimum: 1000.0
            })
        );
        assert_eq!(account.balance(), 1000.0);
    }

    #[test]
    fn test_accrual() {
        let mut account = checking(1000.0, 500.0);
        account.accrue_interest();
        assert_eq!(round_cents(account.balance()), 1010.0);

        let mut account = investment(5000.0, 1000.0, 100.0);
        account.accrue_interest();
        assert_eq!(round_cents(account.balance()), 5100.0);
    }

    #[test]
    fn test_accrual_compounds() {
        let mut account = checking(1000.0, 500.0);
        account.accrue_interest();
        account.accrue_interest();
        assert!((account.balance() - 1000.0 * 1.01 * 1.01).abs() < 1e-9);
        assert_eq!(round_cents(account.balance()), 1020.1);
    }

    #[test]
    fn test_accrual_on_negative_balance() {
        let mut account = checking(0.0, 500.0);
        assert!(account.withdraw(100.0));
        account.accrue_interest();
        assert_eq!(round_cents(account.balance()), -101.0);
    }

    #[test]
    fn test_kind_validation() {
        assert!(AccountKind::Checking {
            overdraft_limit: 0.0
        }
        .validate()
        .is_ok());
        assert!(AccountKind::Checking {
            overdraft_limit: -1.0
        }
        .validate()
        .is_err());
        assert!(matches!(
            AccountKind::Investment {
                minimum_balance: 10.0,
                minimum_deposit: f64::INFINITY
            }
            .validate(),
            Err(AccountValidationError::InvalidParameter {
                name: "minimum deposit",
                ..
            })
        ));
    }

    #[test]
    fn test_account_type_parsing() {
        assert_eq!(AccountType::parse("checking"), Some(AccountType::Checking));
        assert_eq!(AccountType::parse("INVESTMENT"), Some(AccountType::Investment));
        assert_eq!(AccountType::parse("savings"), None);
    }

    #[test]
    fn test_display() {
        let account = checking(1000.0, 500.0);
        assert_eq!(
            account.to_string(),
            "Checking Account #1000 (Owner: 111.111.111-11, Balance: 1.000,00, Limit: 500,00)"
        );
    }

    #[test]
    fn test_serialization() {
        let account = investment(5000.0, 1000.0, 100.0);
        let json = serde_json::to_string(&account).unwrap();
        assert!(json.contains("\"type\":\"investment\""));
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account, deserialized);
    }
}
