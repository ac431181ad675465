//! Account service
//!
//! Links accounts to customers and runs operations on them. Operations are
//! addressed by the owning customer's national ID, since a customer holds
//! at most one account.

use crate::config::UnderfundedPolicy;
use crate::error::{TellerError, TellerResult};
use crate::models::{Account, AccountKind, Customer, NationalId, RejectedOperation};
use crate::storage::Storage;

/// Service for account management
pub struct AccountService<'a> {
    storage: &'a Storage,
    policy: UnderfundedPolicy,
}

/// Parameters for a new account
#[derive(Debug, Clone, Copy)]
pub struct OpenAccount {
    pub initial_deposit: f64,
    pub kind: AccountKind,
}

/// An account together with its owner's record
#[derive(Debug, Clone)]
pub struct AccountSummary {
    pub account: Account,
    /// Owner record, if the customer still exists
    pub owner: Option<Customer>,
}

impl<'a> AccountService<'a> {
    /// Create a new account service that keeps underfunded accounts
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            policy: UnderfundedPolicy::default(),
        }
    }

    /// Choose what happens when an opening deposit is refused
    pub fn with_policy(mut self, policy: UnderfundedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Open an account for an existing customer
    ///
    /// Fails if the customer is unknown or already has an account. When
    /// a positive opening deposit into an investment account is refused,
    /// the account is kept with a zero balance or discarded depending on
    /// the service's policy. Checking accounts are always kept.
    pub fn link(&self, national_id: &NationalId, open: OpenAccount) -> TellerResult<Account> {
        let customer = self
            .storage
            .customers
            .find_by_id(national_id)?
            .ok_or_else(|| TellerError::customer_not_found(national_id.to_string()))?;

        if self.storage.accounts.find_by_owner_id(national_id)?.is_some() {
            return Err(duplicate_account(&customer));
        }

        open.kind
            .validate()
            .map_err(|e| TellerError::Validation(e.to_string()))?;

        let account = Account::open(
            self.storage.sequence().next_number(),
            national_id.clone(),
            open.initial_deposit,
            open.kind,
        );

        if let Some(rejection) = account.opening_rejection() {
            let cancellable = open.initial_deposit > 0.0
                && matches!(open.kind, AccountKind::Investment { .. });

            if cancellable && self.policy == UnderfundedPolicy::Cancel {
                tracing::warn!(%national_id, %rejection, "account creation cancelled");
                return Err(rejection.into());
            }

            tracing::warn!(
                number = %account.number(),
                %rejection,
                "opening deposit refused; keeping account with zero balance"
            );
        }

        if !self.storage.accounts.add_if_absent(account.clone())? {
            return Err(duplicate_account(&customer));
        }

        tracing::info!(
            number = %account.number(),
            %national_id,
            kind = %account.account_type(),
            balance = account.balance(),
            "account linked"
        );
        Ok(account)
    }

    /// Get the account owned by a customer
    pub fn find_for_customer(&self, national_id: &NationalId) -> TellerResult<Option<Account>> {
        tracing::debug!(%national_id, "account lookup");
        self.storage.accounts.find_by_owner_id(national_id)
    }

    /// Get the account owned by a customer, failing if there is none
    pub fn get_for_customer(&self, national_id: &NationalId) -> TellerResult<Account> {
        self.find_for_customer(national_id)?.ok_or_else(|| {
            TellerError::account_not_found(format!("no account for customer {}", national_id))
        })
    }

    /// Get all accounts with their owners
    pub fn list(&self) -> TellerResult<Vec<AccountSummary>> {
        let accounts = self.storage.accounts.list()?;
        let mut summaries = Vec::with_capacity(accounts.len());

        for account in accounts {
            let owner = self.storage.customers.find_by_id(account.owner())?;
            summaries.push(AccountSummary { account, owner });
        }

        Ok(summaries)
    }

    /// Summary for a single customer's account
    pub fn summary_for_customer(&self, national_id: &NationalId) -> TellerResult<AccountSummary> {
        let account = self.get_for_customer(national_id)?;
        let owner = self.storage.customers.find_by_id(national_id)?;
        Ok(AccountSummary { account, owner })
    }

    /// Deposit into a customer's account
    pub fn deposit(&self, national_id: &NationalId, amount: f64) -> TellerResult<Account> {
        self.apply(national_id, "deposit", |account| account.try_deposit(amount))
    }

    /// Withdraw from a customer's account
    pub fn withdraw(&self, national_id: &NationalId, amount: f64) -> TellerResult<Account> {
        self.apply(national_id, "withdrawal", |account| account.try_withdraw(amount))
    }

    /// Accrue interest on a customer's account
    pub fn accrue(&self, national_id: &NationalId) -> TellerResult<Account> {
        self.apply(national_id, "accrual", |account| {
            account.accrue_interest();
            Ok(())
        })
    }

    /// Current balance of a customer's account
    pub fn balance(&self, national_id: &NationalId) -> TellerResult<f64> {
        Ok(self.get_for_customer(national_id)?.balance())
    }

    fn apply(
        &self,
        national_id: &NationalId,
        operation: &'static str,
        f: impl FnOnce(&mut Account) -> Result<(), RejectedOperation>,
    ) -> TellerResult<Account> {
        let number = self.get_for_customer(national_id)?.number();

        let outcome = self.storage.accounts.update_with(number, |account| {
            f(&mut *account).map(|()| account.clone())
        })?;

        match outcome {
            Ok(account) => {
                tracing::info!(%number, operation, balance = account.balance(), "operation applied");
                Ok(account)
            }
            Err(rejection) => {
                tracing::warn!(%number, operation, %rejection, "operation rejected");
                Err(rejection.into())
            }
        }
    }
}

fn duplicate_account(customer: &Customer) -> TellerError {
    TellerError::Duplicate {
        entity_type: "Account",
        identifier: format!("customer {} already has an account", customer.national_id()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::money::round_cents;
    use crate::services::customer::{CustomerService, NewCustomer};

    fn create_test_storage() -> Storage {
        let storage = Storage::new();
        let customers = CustomerService::new(&storage);
        for (first, national_id) in [("Ana", "11111111111"), ("Bruno", "22222222222")] {
            customers
                .register(NewCustomer {
                    first_name: first.into(),
                    last_name: "Silva".into(),
                    secondary_id: "123".into(),
                    national_id: national_id.into(),
                    address: "Rua A".into(),
                })
                .unwrap();
        }
        storage
    }

    fn id(s: &str) -> NationalId {
        NationalId::parse(s).unwrap()
    }

    fn checking(initial: f64, limit: f64) -> OpenAccount {
        OpenAccount {
            initial_deposit: initial,
            kind: AccountKind::Checking {
                overdraft_limit: limit,
            },
        }
    }

    fn investment(initial: f64, min_balance: f64, min_deposit: f64) -> OpenAccount {
        OpenAccount {
            initial_deposit: initial,
            kind: AccountKind::Investment {
                minimum_balance: min_balance,
                minimum_deposit: min_deposit,
            },
        }
    }

    #[test]
    fn test_link_account() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service.link(&id("11111111111"), checking(1000.0, 500.0)).unwrap();
        assert_eq!(account.number().value(), 1000);
        assert_eq!(account.balance(), 1000.0);

        let found = service.get_for_customer(&id("11111111111")).unwrap();
        assert_eq!(found.number(), account.number());
    }

    #[test]
    fn test_link_numbers_increase() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);

        let a = service.link(&id("11111111111"), checking(10.0, 0.0)).unwrap();
        let b = service.link(&id("22222222222"), checking(10.0, 0.0)).unwrap();
        assert!(b.number() > a.number());
    }

    #[test]
    fn test_link_requires_existing_customer() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);

        let err = service.link(&id("99999999999"), checking(10.0, 0.0)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(storage.accounts.count().unwrap(), 0);
    }

    #[test]
    fn test_link_one_account_per_customer() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);

        service.link(&id("11111111111"), checking(10.0, 0.0)).unwrap();
        let err = service
            .link(&id("11111111111"), investment(500.0, 0.0, 100.0))
            .unwrap_err();
        assert!(matches!(err, TellerError::Duplicate { .. }));
        assert_eq!(storage.accounts.count().unwrap(), 1);
    }

    #[test]
    fn test_link_rejects_negative_parameters() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);

        let err = service.link(&id("11111111111"), checking(10.0, -5.0)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_underfunded_investment_kept_by_default() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);

        let account = service
            .link(&id("11111111111"), investment(50.0, 0.0, 100.0))
            .unwrap();
        assert_eq!(account.balance(), 0.0);
        assert!(account.opening_rejection().is_some());

        let after = service.deposit(&id("11111111111"), 150.0).unwrap();
        assert_eq!(after.balance(), 150.0);
    }

    #[test]
    fn test_underfunded_investment_cancelled() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage).with_policy(UnderfundedPolicy::Cancel);

        let err = service
            .link(&id("11111111111"), investment(50.0, 0.0, 100.0))
            .unwrap_err();
        assert!(err.is_rejected());
        assert!(service.find_for_customer(&id("11111111111")).unwrap().is_none());
    }

    #[test]
    fn test_zero_opening_never_cancelled() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage).with_policy(UnderfundedPolicy::Cancel);

        let account = service
            .link(&id("11111111111"), investment(0.0, 0.0, 100.0))
            .unwrap();
        assert_eq!(account.balance(), 0.0);
        assert!(account.opening_rejection().is_none());

        let account = service.link(&id("22222222222"), checking(0.0, 500.0)).unwrap();
        assert_eq!(account.balance(), 0.0);
        assert!(account.opening_rejection().is_none());

        assert_eq!(storage.accounts.count().unwrap(), 2);
    }

    #[test]
    fn test_refused_checking_opening_is_kept_under_cancel() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage).with_policy(UnderfundedPolicy::Cancel);

        let account = service.link(&id("11111111111"), checking(-10.0, 0.0)).unwrap();
        assert_eq!(account.balance(), 0.0);
        assert_eq!(
            account.opening_rejection(),
            Some(RejectedOperation::NonPositiveAmount)
        );
        assert!(service.find_for_customer(&id("11111111111")).unwrap().is_some());
    }

    #[test]
    fn test_non_finite_amounts_keep_balance_bounded() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);
        let owner = id("11111111111");
        service.link(&owner, checking(100.0, 0.0)).unwrap();

        let err = service.deposit(&owner, f64::INFINITY).unwrap_err();
        assert!(matches!(
            err,
            TellerError::Rejected(RejectedOperation::NonFiniteAmount)
        ));
        assert!(service.withdraw(&owner, f64::INFINITY).unwrap_err().is_rejected());
        assert!(service.withdraw(&owner, 1e9).unwrap_err().is_rejected());

        let balance = service.balance(&owner).unwrap();
        assert_eq!(balance, 100.0);
        assert!(balance >= 0.0);
    }

    #[test]
    fn test_checking_operations() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);
        let owner = id("11111111111");
        service.link(&owner, checking(1000.0, 500.0)).unwrap();

        let err = service.withdraw(&owner, 1501.0).unwrap_err();
        assert!(matches!(
            err,
            TellerError::Rejected(RejectedOperation::OverdraftExceeded { .. })
        ));
        assert_eq!(service.balance(&owner).unwrap(), 1000.0);

        let after = service.withdraw(&owner, 1500.0).unwrap();
        assert_eq!(after.balance(), -500.0);

        let err = service.deposit(&owner, 0.0).unwrap_err();
        assert!(err.is_rejected());
    }

    #[test]
    fn test_investment_operations() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);
        let owner = id("22222222222");
        service.link(&owner, investment(5000.0, 1000.0, 100.0)).unwrap();

        assert_eq!(service.withdraw(&owner, 4000.0).unwrap().balance(), 1000.0);
        assert!(service.withdraw(&owner, 1.0).unwrap_err().is_rejected());
        assert!(service.deposit(&owner, 99.0).unwrap_err().is_rejected());
        assert_eq!(service.balance(&owner).unwrap(), 1000.0);

        let accrued = service.accrue(&owner).unwrap();
        assert_eq!(round_cents(accrued.balance()), 1020.0);
    }

    #[test]
    fn test_operations_without_account() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);

        let err = service.deposit(&id("11111111111"), 10.0).unwrap_err();
        assert!(err.is_not_found());
        assert!(service.accrue(&id("11111111111")).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_includes_owner() {
        let storage = create_test_storage();
        let service = AccountService::new(&storage);
        service.link(&id("22222222222"), checking(10.0, 0.0)).unwrap();

        let summaries = service.list().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].owner.as_ref().unwrap().first_name, "Bruno");
    }
}
