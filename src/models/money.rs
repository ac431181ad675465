//! Amount parsing and formatting
//!
//! Balances are plain `f64` values. Amounts typed by a user follow the
//! localized convention of comma as fractional separator and dot as
//! thousands separator; they are normalized here before reaching any
//! account.

use std::fmt;

/// Round an amount to two fractional digits
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Parse an amount typed by a user
///
/// Accepts formats: "1.234,56", "1234,5", "1.000", "R$ 10,00", "-5,25"
/// and the plain "1234.56" (a single dot followed by one or two digits).
///
/// # Examples
/// ```
/// use teller_cli::models::money::parse_amount;
/// assert_eq!(parse_amount("1.234,56").unwrap(), 1234.56);
/// assert_eq!(parse_amount("1.000").unwrap(), 1000.0);
/// ```
pub fn parse_amount(s: &str) -> Result<f64, MoneyParseError> {
    let original = s;
    let s = s.trim();

    let (negative, s) = match s.strip_prefix('-') {
        Some(stripped) => (true, stripped.trim_start()),
        None => (false, s),
    };

    // Remove currency symbol if present
    let s = s
        .strip_prefix("R$")
        .or_else(|| s.strip_prefix('$'))
        .unwrap_or(s)
        .trim();

    if s.is_empty() {
        return Err(MoneyParseError::InvalidFormat(original.to_string()));
    }

    let normalized = if s.contains(',') {
        if s.matches(',').count() > 1 {
            return Err(MoneyParseError::InvalidFormat(original.to_string()));
        }
        s.replace('.', "").replace(',', ".")
    } else if is_plain_decimal(s) {
        s.to_string()
    } else {
        s.replace('.', "")
    };

    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.')
    {
        return Err(MoneyParseError::InvalidFormat(original.to_string()));
    }

    let value: f64 = normalized
        .parse()
        .map_err(|_| MoneyParseError::InvalidFormat(original.to_string()))?;

    // A long enough digit string parses to infinity
    if !value.is_finite() {
        return Err(MoneyParseError::InvalidFormat(original.to_string()));
    }

    Ok(if negative { -value } else { value })
}

/// "1234.5" / "10.25": exactly one dot with one or two digits after it
fn is_plain_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((_, frac)) => !frac.contains('.') && (1..=2).contains(&frac.len()),
        None => false,
    }
}

/// Format an amount with two decimals, dot thousands and comma decimals
///
/// # Examples
/// ```
/// use teller_cli::models::money::format_amount;
/// assert_eq!(format_amount(-1234.5, "R$"), "-R$ 1.234,50");
/// ```
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let negative = cents < 0;
    let cents = cents.unsigned_abs();

    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if symbol.is_empty() {
        format!("{}{},{:02}", sign, grouped, cents % 100)
    } else {
        format!("{}{} {},{:02}", sign, symbol, grouped, cents % 100)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
