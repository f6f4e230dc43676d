//! # Formatting
//!
//! Rupee formatting for invoices and the dashboard.
//!
//! ## Indian Digit Grouping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Western:  1,234,567.89      thousand / million                         │
//! │  Indian:   12,34,567.89      thousand / lakh / crore                    │
//! │                                                                         │
//! │  The last three integer digits form one group; everything to the left  │
//! │  is grouped in pairs.                                                   │
//! │                                                                         │
//! │  Words follow the same scheme:                                          │
//! │    1,00,000     = One Lakh                                              │
//! │    1,00,00,000  = One Crore                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions round half away from zero to paise first; nothing else
//! in the crate rounds.

use rust_decimal::prelude::ToPrimitive;

use crate::money::Money;

const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u128 = 10_000_000;
const LAKH: u128 = 100_000;
const THOUSAND: u128 = 1_000;

/// Splits an amount into (negative, whole rupees, paise) after rounding.
fn rupees_and_paise(amount: Money) -> (bool, u128, u32) {
    let rounded = amount.round_to_paise();
    let negative = rounded.is_negative();
    let abs = rounded.amount().abs();

    let rupees = abs.trunc().to_u128().unwrap_or(0);
    let paise = (abs.fract() * rust_decimal::Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0);

    (negative, rupees, paise)
}

/// Groups digits the Indian way: `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats a rupee amount: `₹` symbol, Indian grouping, two decimals.
///
/// ```rust
/// use bistro_core::format::format_currency;
/// use bistro_core::Money;
///
/// assert_eq!(format_currency(Money::from_paise(21121)), "₹211.21");
/// assert_eq!(format_currency(Money::from_paise(123456789)), "₹12,34,567.89");
/// assert_eq!(format_currency(Money::from_paise(-550)), "-₹5.50");
/// ```
pub fn format_currency(amount: Money) -> String {
    let (negative, rupees, paise) = rupees_and_paise(amount);
    let sign = if negative { "-" } else { "" };
    format!("{}₹{}.{:02}", sign, group_indian(&rupees.to_string()), paise)
}

fn below_hundred(n: u128) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else if n % 10 == 0 {
        TENS[(n / 10) as usize].to_string()
    } else {
        format!("{} {}", TENS[(n / 10) as usize], ONES[(n % 10) as usize])
    }
}

fn below_thousand(n: u128) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, _) => below_hundred(rest),
        (h, 0) => format!("{} Hundred", ONES[h as usize]),
        (h, r) => format!("{} Hundred {}", ONES[h as usize], below_hundred(r)),
    }
}

/// Spells a whole number using crore / lakh / thousand / hundred.
///
/// Amounts of a hundred crore or more spell the crore count recursively
/// ("One Hundred Crore", "One Lakh Crore").
fn integer_words(n: u128) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();

    let crores = n / CRORE;
    if crores > 0 {
        parts.push(format!("{} Crore", integer_words(crores)));
    }

    let lakhs = (n % CRORE) / LAKH;
    if lakhs > 0 {
        parts.push(format!("{} Lakh", below_hundred(lakhs)));
    }

    let thousands = (n % LAKH) / THOUSAND;
    if thousands > 0 {
        parts.push(format!("{} Thousand", below_hundred(thousands)));
    }

    let rest = n % THOUSAND;
    if rest > 0 {
        parts.push(below_thousand(rest));
    }

    parts.join(" ")
}

/// Spells an amount for the "amount in words" line of an invoice.
///
/// ```rust
/// use bistro_core::format::number_to_words;
/// use bistro_core::Money;
///
/// assert_eq!(
///     number_to_words(Money::from_paise(21121)),
///     "Two Hundred Eleven Rupees and Twenty One Paise Only"
/// );
/// assert_eq!(number_to_words(Money::from_rupees(150000)), "One Lakh Fifty Thousand Rupees Only");
/// ```
pub fn number_to_words(amount: Money) -> String {
    let (negative, rupees, paise) = rupees_and_paise(amount);

    let mut words = String::new();
    if negative {
        words.push_str("Minus ");
    }

    words.push_str(&integer_words(rupees));
    words.push_str(if rupees == 1 { " Rupee" } else { " Rupees" });

    if paise > 0 {
        words.push_str(" and ");
        words.push_str(&below_hundred(u128::from(paise)));
        words.push_str(if paise == 1 { " Paisa" } else { " Paise" });
    }

    words.push_str(" Only");
    words
}

// =============================================================================
// Unit Tests
// =============================================================================
