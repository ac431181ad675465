//! Account registry
//!
//! Holds every open account in insertion order and mediates all mutations,
//! so deposits, withdrawals and accruals always go through the account's
//! own rules.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{TellerError, TellerResult};
use crate::models::{Account, AccountNumber, Customer, NationalId};

/// Looks up the balance of a customer's account
///
/// Injected into the customer registry so it can sort by balance without
/// owning the account registry.
pub trait BalanceLookup {
    /// Balance of the account owned by `national_id`, or 0.0 if none
    fn balance_for(&self, national_id: &NationalId) -> f64;
}

/// Registry of all accounts
#[derive(Default)]
pub struct AccountRegistry {
    data: RwLock<Vec<Account>>,
}

impl AccountRegistry {
    /// Create an empty account registry
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> TellerResult<RwLockReadGuard<'_, Vec<Account>>> {
        self.data
            .read()
            .map_err(|e| TellerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TellerResult<RwLockWriteGuard<'_, Vec<Account>>> {
        self.data
            .write()
            .map_err(|e| TellerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Append an account
    ///
    /// Does not check whether the owner already has one; use
    /// [`AccountRegistry::add_if_absent`] for that.
    pub fn add(&self, account: Account) -> TellerResult<()> {
        self.write()?.push(account);
        Ok(())
    }

    /// Append an account unless its owner already has one
    ///
    /// The check and the insert happen under one write lock.
    pub fn add_if_absent(&self, account: Account) -> TellerResult<bool> {
        let mut data = self.write()?;
        if data.iter().any(|a| a.is_owned_by(account.owner())) {
            return Ok(false);
        }
        data.push(account);
        Ok(true)
    }

    /// First account owned by the customer with `national_id`
    pub fn find_by_owner_id(&self, national_id: &NationalId) -> TellerResult<Option<Account>> {
        Ok(self
            .read()?
            .iter()
            .find(|a| a.is_owned_by(national_id))
            .cloned())
    }

    /// Account with the given number
    pub fn find_by_number(&self, number: AccountNumber) -> TellerResult<Option<Account>> {
        Ok(self.read()?.iter().find(|a| a.number() == number).cloned())
    }

    /// All accounts, in insertion order
    pub fn list(&self) -> TellerResult<Vec<Account>> {
        Ok(self.read()?.clone())
    }

    /// Remove every account owned by `customer`, returning how many went
    pub fn remove_all_for_customer(&self, customer: &Customer) -> TellerResult<usize> {
        let mut data = self.write()?;
        let before = data.len();
        data.retain(|a| !a.is_owned_by(customer.national_id()));
        Ok(before - data.len())
    }

    /// Remove a single account by number
    pub fn remove(&self, number: AccountNumber) -> TellerResult<bool> {
        let mut data = self.write()?;
        match data.iter().position(|a| a.number() == number) {
            Some(index) => {
                data.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Apply `f` to the stored account under the write lock
    pub fn update_with<R>(
        &self,
        number: AccountNumber,
        f: impl FnOnce(&mut Account) -> R,
    ) -> TellerResult<R> {
        let mut data = self.write()?;
        let account = data
            .iter_mut()
            .find(|a| a.number() == number)
            .ok_or_else(|| TellerError::account_not_found(number.to_string()))?;
        Ok(f(account))
    }

    /// Deposit into the account; `Ok(false)` if its rules refused
    pub fn deposit(&self, number: AccountNumber, amount: f64) -> TellerResult<bool> {
        self.update_with(number, |account| account.deposit(amount))
    }

    /// Withdraw from the account; `Ok(false)` if its rules refused
    pub fn withdraw(&self, number: AccountNumber, amount: f64) -> TellerResult<bool> {
        self.update_with(number, |account| account.withdraw(amount))
    }

    /// Accrue interest on the account
    pub fn accrue(&self, number: AccountNumber) -> TellerResult<()> {
        self.update_with(number, Account::accrue_interest)
    }

    /// Count accounts
    pub fn count(&self) -> TellerResult<usize> {
        Ok(self.read()?.len())
    }
}

impl BalanceLookup for AccountRegistry {
    fn balance_for(&self, national_id: &NationalId) -> f64 {
        self.find_by_owner_id(national_id)
            .ok()
            .flatten()
            .map_or(0.0, |a| a.balance())
    }
}
