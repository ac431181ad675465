//! Sample data
//!
//! Every process starts from the same fixed set of customers and accounts
//! so the application is usable right away.

use crate::error::TellerResult;
use crate::models::{Account, Customer, NationalId};

use super::Storage;

/// Seed three sample customers and link accounts to the first two
///
/// Returns the number of customers added. Customers already present are
/// left alone.
pub fn seed_sample_data(storage: &Storage) -> TellerResult<usize> {
    let mut added = 0;

    for (first, last, secondary_id, national_id, address) in [
        ("Amanda", "Cristine", "1234567", "11111111111", "Rua A"),
        ("Eduardo", "Almeida", "7654321", "22222222222", "Rua B"),
        ("Guilherme", "Gemniczak", "9876543", "33333333333", "Rua C"),
    ] {
        let customer = Customer::new(first, last, secondary_id, sample_id(national_id)?, address);
        if storage.customers.add_if_absent(customer)? {
            added += 1;
        }
    }

    // Checking for Amanda: 1000 opening, 500 overdraft limit
    let amanda = sample_id("11111111111")?;
    let checking = Account::checking(storage.sequence().next_number(), amanda, 1000.0, 500.0);
    storage.accounts.add_if_absent(checking)?;

    // Investment for Eduardo: 5000 opening, 1000 minimum balance, 100 minimum deposit
    let eduardo = sample_id("22222222222")?;
    let investment = Account::investment(
        storage.sequence().next_number(),
        eduardo,
        5000.0,
        1000.0,
        100.0,
    );
    storage.accounts.add_if_absent(investment)?;

    Ok(added)
}

fn sample_id(s: &str) -> TellerResult<NationalId> {
    Ok(NationalId::parse(s)?)
}
