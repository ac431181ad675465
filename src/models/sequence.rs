//! Account number generator

use std::sync::atomic::{AtomicU32, Ordering};

use super::ids::AccountNumber;

/// First number handed out by a default sequence
pub const DEFAULT_FIRST_ACCOUNT_NUMBER: u32 = 1000;

/// Hands out strictly increasing account numbers
///
/// Numbers are never reused within a sequence. Nothing is persisted, so a
/// fresh process starts again from the same seed.
#[derive(Debug)]
pub struct AccountNumberSequence {
    next: AtomicU32,
}

impl AccountNumberSequence {
    /// Create a sequence starting at 1000
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_FIRST_ACCOUNT_NUMBER)
    }

    /// Create a sequence with an explicit seed
    pub fn starting_at(first: u32) -> Self {
        Self {
            next: AtomicU32::new(first),
        }
    }

    /// Take the next number
    pub fn next_number(&self) -> AccountNumber {
        AccountNumber::new(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// The number the next call will return
    pub fn peek(&self) -> AccountNumber {
        AccountNumber::new(self.next.load(Ordering::SeqCst))
    }
}

impl Default for AccountNumberSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_starts_at_1000() {
        let seq = AccountNumberSequence::new();
        assert_eq!(seq.peek().value(), 1000);
        assert_eq!(seq.next_number().value(), 1000);
        assert_eq!(seq.next_number().value(), 1001);
        assert_eq!(seq.peek().value(), 1002);
    }

    #[test]
    fn test_strictly_increasing_and_distinct() {
        let seq = AccountNumberSequence::starting_at(5);
        let numbers: Vec<u32> = (0..50).map(|_| seq.next_number().value()).collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(numbers[0], 5);
    }

    #[test]
    fn test_concurrent_numbers_are_unique() {
        let seq = Arc::new(AccountNumberSequence::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let seq = Arc::clone(&seq);
                thread::spawn(move || {
                    (0..100)
                        .map(|_| seq.next_number().value())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
    }
}
