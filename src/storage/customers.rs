//! Customer registry
//!
//! Keeps customers in insertion order and provides lookup, search and
//! sorting.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{TellerError, TellerResult};
use crate::models::{Customer, NationalId};

use super::accounts::BalanceLookup;

/// Field a customer list can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    /// First name, ascending
    Name,
    /// Last name, ascending
    Surname,
    /// Linked account balance, descending (no account counts as zero)
    Balance,
}

impl SortCriterion {
    /// Parse a criterion (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" | "first_name" | "firstname" => Some(Self::Name),
            "surname" | "last_name" | "lastname" => Some(Self::Surname),
            "balance" | "salary" => Some(Self::Balance),
            _ => None,
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Surname => write!(f, "surname"),
            Self::Balance => write!(f, "balance"),
        }
    }
}

/// Registry of all customers
pub struct CustomerRegistry {
    data: RwLock<Vec<Customer>>,
    balances: Arc<dyn BalanceLookup + Send + Sync>,
}

impl CustomerRegistry {
    /// Create an empty registry that sorts by balance through `balances`
    pub fn new(balances: Arc<dyn BalanceLookup + Send + Sync>) -> Self {
        Self {
            data: RwLock::new(Vec::new()),
            balances,
        }
    }

    fn read(&self) -> TellerResult<RwLockReadGuard<'_, Vec<Customer>>> {
        self.data
            .read()
            .map_err(|e| TellerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> TellerResult<RwLockWriteGuard<'_, Vec<Customer>>> {
        self.data
            .write()
            .map_err(|e| TellerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Append a customer
    pub fn add(&self, customer: Customer) -> TellerResult<()> {
        self.write()?.push(customer);
        Ok(())
    }

    /// Append a customer unless one with the same national ID exists
    pub fn add_if_absent(&self, customer: Customer) -> TellerResult<bool> {
        let mut data = self.write()?;
        if data.contains(&customer) {
            return Ok(false);
        }
        data.push(customer);
        Ok(true)
    }

    /// Replace the stored record with the same national ID
    pub fn update(&self, customer: Customer) -> TellerResult<bool> {
        let mut data = self.write()?;
        match data.iter_mut().find(|c| **c == customer) {
            Some(slot) => {
                *slot = customer;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove the first customer equal to `customer`
    pub fn remove(&self, customer: &Customer) -> TellerResult<bool> {
        let mut data = self.write()?;
        match data.iter().position(|c| c == customer) {
            Some(index) => {
                data.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Customer with the given national ID
    pub fn find_by_id(&self, national_id: &NationalId) -> TellerResult<Option<Customer>> {
        Ok(self
            .read()?
            .iter()
            .find(|c| c.national_id() == national_id)
            .cloned())
    }

    /// All customers, in insertion order
    pub fn list(&self) -> TellerResult<Vec<Customer>> {
        Ok(self.read()?.clone())
    }

    /// Customers whose names (case-insensitive) or documents
    /// (case-sensitive) contain `term`, in insertion order
    pub fn search(&self, term: &str) -> TellerResult<Vec<Customer>> {
        Ok(self
            .read()?
            .iter()
            .filter(|c| c.matches(term))
            .cloned()
            .collect())
    }

    /// Return a sorted copy of `customers`; the input is left untouched
    ///
    /// The sort is stable, so ties keep their input order.
    pub fn sort(&self, criterion: SortCriterion, customers: &[Customer]) -> Vec<Customer> {
        let mut sorted = customers.to_vec();
        match criterion {
            SortCriterion::Name => sorted.sort_by(|a, b| a.natural_cmp(b)),
            SortCriterion::Surname => sorted.sort_by(|a, b| a.last_name.cmp(&b.last_name)),
            SortCriterion::Balance => {
                sorted.sort_by_cached_key(|c| {
                    std::cmp::Reverse(OrderedBalance(self.balances.balance_for(c.national_id())))
                });
            }
        }
        sorted
    }

    /// Count customers
    pub fn count(&self) -> TellerResult<usize> {
        Ok(self.read()?.len())
    }
}

/// Total order over balances for sorting
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrderedBalance(f64);

impl Eq for OrderedBalance {}

impl PartialOrd for OrderedBalance {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedBalance {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedBalances(HashMap<String, f64>);

    impl BalanceLookup for FixedBalances {
        fn balance_for(&self, national_id: &NationalId) -> f64 {
            self.0.get(national_id.as_str()).copied().unwrap_or(0.0)
        }
    }

    fn id(s: &str) -> NationalId {
        NationalId::parse(s).unwrap()
    }

    fn customer(first: &str, last: &str, rg: &str, national_id: &str) -> Customer {
        Customer::new(first, last, rg, id(national_id), "Rua A")
    }

    fn create_test_registry(balances: &[(&str, f64)]) -> CustomerRegistry {
        let map = balances
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        let registry = CustomerRegistry::new(Arc::new(FixedBalances(map)));
        registry
            .add(customer("Guilherme", "Gemniczak", "9876543", "33333333333"))
            .unwrap();
        registry
            .add(customer("amanda", "Cristine", "1234567", "11111111111"))
            .unwrap();
        registry
            .add(customer("Eduardo", "Almeida", "7654321", "22222222222"))
            .unwrap();
        registry
    }

    fn first_names(customers: &[Customer]) -> Vec<&str> {
        customers.iter().map(|c| c.first_name.as_str()).collect()
    }

    #[test]
    fn test_find_by_id() {
        let registry = create_test_registry(&[]);
        let found = registry.find_by_id(&id("22222222222")).unwrap().unwrap();
        assert_eq!(found.first_name, "Eduardo");
        assert!(registry.find_by_id(&id("999")).unwrap().is_none());
    }

    #[test]
    fn test_add_if_absent_rejects_duplicate_national_id() {
        let registry = create_test_registry(&[]);
        let dup = customer("Other", "Person", "000", "11111111111");
        assert!(!registry.add_if_absent(dup).unwrap());
        assert_eq!(registry.count().unwrap(), 3);

        let fresh = customer("New", "Person", "000", "44444444444");
        assert!(registry.add_if_absent(fresh).unwrap());
        assert_eq!(registry.count().unwrap(), 4);
    }

    #[test]
    fn test_remove() {
        let registry = create_test_registry(&[]);
        let target = registry.find_by_id(&id("11111111111")).unwrap().unwrap();
        assert!(registry.remove(&target).unwrap());
        assert!(!registry.remove(&target).unwrap());
        assert_eq!(registry.count().unwrap(), 2);
    }

    #[test]
    fn test_update_keeps_position() {
        let registry = create_test_registry(&[]);
        let mut amanda = registry.find_by_id(&id("11111111111")).unwrap().unwrap();
        amanda.set_address("Rua Nova");
        assert!(registry.update(amanda).unwrap());

        let all = registry.list().unwrap();
        assert_eq!(all[1].address, "Rua Nova");
        assert!(!registry
            .update(customer("X", "Y", "Z", "55555555555"))
            .unwrap());
    }

    #[test]
    fn test_search() {
        let registry = create_test_registry(&[]);

        assert_eq!(first_names(&registry.search("AMANDA").unwrap()), ["amanda"]);
        assert_eq!(first_names(&registry.search("almei").unwrap()), ["Eduardo"]);
        assert_eq!(first_names(&registry.search("7654321").unwrap()), ["Eduardo"]);
        assert_eq!(first_names(&registry.search("3333").unwrap()), ["Guilherme"]);
        // insertion order, not sorted
        assert_eq!(
            first_names(&registry.search("e").unwrap()),
            ["Guilherme", "amanda", "Eduardo"]
        );
        assert!(registry.search("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_sort_by_name_is_non_destructive() {
        let registry = create_test_registry(&[]);
        let input = registry.list().unwrap();
        let sorted = registry.sort(SortCriterion::Name, &input);

        // lexicographic: uppercase before lowercase
        assert_eq!(first_names(&sorted), ["Eduardo", "Guilherme", "amanda"]);
        assert_eq!(first_names(&input), ["Guilherme", "amanda", "Eduardo"]);
    }

    #[test]
    fn test_sort_by_surname() {
        let registry = create_test_registry(&[]);
        let sorted = registry.sort(SortCriterion::Surname, &registry.list().unwrap());
        assert_eq!(first_names(&sorted), ["Eduardo", "amanda", "Guilherme"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let registry = CustomerRegistry::new(Arc::new(FixedBalances(HashMap::new())));
        let input = vec![
            customer("Ana", "Silva", "1", "1"),
            customer("Bia", "Costa", "2", "2"),
            customer("Ana", "Costa", "3", "3"),
        ];
        let by_name = registry.sort(SortCriterion::Name, &input);
        let ids: Vec<_> = by_name.iter().map(|c| c.national_id().as_str()).collect();
        assert_eq!(ids, ["1", "3", "2"]);

        let by_surname = registry.sort(SortCriterion::Surname, &input);
        let ids: Vec<_> = by_surname.iter().map(|c| c.national_id().as_str()).collect();
        assert_eq!(ids, ["2", "3", "1"]);
    }

    #[test]
    fn test_sort_by_balance_descending() {
        let registry =
            create_test_registry(&[("11111111111", 1000.0), ("22222222222", 5000.0)]);
        let sorted = registry.sort(SortCriterion::Balance, &registry.list().unwrap());
        assert_eq!(first_names(&sorted), ["Eduardo", "amanda", "Guilherme"]);
    }

    #[test]
    fn test_sort_by_balance_negative_below_missing() {
        let registry = create_test_registry(&[("11111111111", -300.0)]);
        let sorted = registry.sort(SortCriterion::Balance, &registry.list().unwrap());
        // no account = 0, ties keep input order
        assert_eq!(first_names(&sorted), ["Guilherme", "Eduardo", "amanda"]);
    }

    #[test]
    fn test_sort_criterion_parse() {
        assert_eq!(SortCriterion::parse("Name"), Some(SortCriterion::Name));
        assert_eq!(SortCriterion::parse("SURNAME"), Some(SortCriterion::Surname));
        assert_eq!(SortCriterion::parse("salary"), Some(SortCriterion::Balance));
        assert_eq!(SortCriterion::parse("age"), None);
    }
}
