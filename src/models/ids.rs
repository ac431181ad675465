//! Strongly-typed identifiers for customers and accounts
//!
//! Customers are keyed by their national ID document; accounts by a
//! sequential number. Wrapping both keeps them from being mixed up with
//! other strings and integers at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A customer's national ID document, stored as unformatted digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// Parse a national ID, stripping the display mask
    ///
    /// Accepts both `"11111111111"` and `"111.111.111-11"`.
    ///
    /// # Examples
    /// ```
    /// use teller_cli::models::NationalId;
    /// let id = NationalId::parse("111.111.111-11").unwrap();
    /// assert_eq!(id.as_str(), "11111111111");
    /// ```
    pub fn parse(s: &str) -> Result<Self, NationalIdError> {
        let digits: String = s
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '/') && !c.is_whitespace())
            .collect();

        if digits.is_empty() {
            return Err(NationalIdError::Empty);
        }

        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(NationalIdError::InvalidCharacter(bad));
        }

        Ok(Self(digits))
    }

    /// The raw digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the digits contain `term` (case-sensitive substring)
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.0;
        if d.len() == 11 {
            write!(f, "{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..])
        } else {
            f.write_str(d)
        }
    }
}

impl FromStr for NationalId {
    type Err = NationalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for national ID parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NationalIdError {
    #[error("National ID cannot be empty")]
    Empty,
    #[error("National ID may only contain digits (found '{0}')")]
    InvalidCharacter(char),
}

/// Sequential account number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(u32);

impl AccountNumber {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}
