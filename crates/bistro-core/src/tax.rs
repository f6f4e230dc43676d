//! # Tax Module
//!
//! GST rate resolution and CGST/SGST/IGST splitting.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  LineItem.hsn_code ──► resolve_rate() ──► TaxRate (18% if unknown)     │
//! │                                              │                          │
//! │  taxable amount ─────────────────────────────┤                          │
//! │                                              ▼                          │
//! │  Jurisdiction ─────────────────────────► split_tax()                    │
//! │                                              │                          │
//! │                         ┌────────────────────┴───────────────────┐     │
//! │                         ▼                                        ▼     │
//! │                  IntraState                               InterState   │
//! │            CGST = SGST = tax / 2                          IGST = tax    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here rounds and nothing here fails.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Jurisdiction, TaxRate};
use crate::validation::validate_tax_rate;

// =============================================================================
// Rate Table
// =============================================================================

/// One HSN code and its GST rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRateEntry {
    pub code: String,
    pub description: String,
    pub rate: TaxRate,
}

impl TaxRateEntry {
    pub fn new(code: impl Into<String>, description: impl Into<String>, rate: TaxRate) -> Self {
        TaxRateEntry {
            code: code.into(),
            description: description.into(),
            rate,
        }
    }
}

/// A named group of HSN codes, as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCategory {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<TaxRateEntry>,
}

/// Anything that can answer "what rate applies to this HSN code?".
///
/// Implemented by [`TaxRateTable`] (standard 18% fallback) and by the
/// billing context in `bistro-billing` (configurable fallback).
pub trait RateSource {
    fn rate_for(&self, code: Option<&str>) -> TaxRate;
}

/// Flat, exact-match HSN code → rate table.
///
/// Categories only exist in configuration; once built, every code lives
/// in one flat map. There is no prefix or chapter matching: `"19"` does
/// not match `"1905"`.
///
/// The table is immutable after construction, so it can be shared across
/// threads behind an `Arc` without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxRateTable {
    entries: BTreeMap<String, TaxRateEntry>,
}

impl TaxRateTable {
    /// Creates an empty table (every code resolves to the fallback).
    pub fn empty() -> Self {
        TaxRateTable {
            entries: BTreeMap::new(),
        }
    }

    /// Flattens categories into a table.
    ///
    /// ## Errors
    /// - [`CoreError::DuplicateHsnCode`] if a code appears more than once
    /// - [`CoreError::InvalidTaxRate`] if a rate is outside 0-100%
    pub fn from_categories<I>(categories: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = TaxCategory>,
    {
        let mut entries = BTreeMap::new();
        let mut owners: BTreeMap<String, String> = BTreeMap::new();

        for category in categories {
            for entry in category.entries {
                if let Err(source) = validate_tax_rate(entry.rate) {
                    return Err(CoreError::InvalidTaxRate {
                        code: entry.code,
                        rate: entry.rate.percent().to_string(),
                        source,
                    });
                }

                if let Some(first) = owners.get(&entry.code) {
                    return Err(CoreError::DuplicateHsnCode {
                        code: entry.code,
                        first_category: first.clone(),
                        second_category: category.name,
                    });
                }

                owners.insert(entry.code.clone(), category.name.clone());
                entries.insert(entry.code.clone(), entry);
            }
        }

        Ok(TaxRateTable { entries })
    }

    /// Built-in table for a restaurant menu.
    pub fn restaurant_defaults() -> Self {
        let entries = default_categories()
            .into_iter()
            .flat_map(|category| category.entries)
            .map(|entry| (entry.code.clone(), entry))
            .collect();
        TaxRateTable { entries }
    }

    /// Exact-match lookup.
    pub fn lookup(&self, code: &str) -> Option<&TaxRateEntry> {
        self.entries.get(code)
    }

    /// Resolves the rate for an optional code, falling back to 18%.
    pub fn resolve_rate(&self, code: Option<&str>) -> TaxRate {
        self.resolve_rate_or(code, TaxRate::STANDARD)
    }

    /// Resolves the rate for an optional code with a caller-chosen fallback.
    pub fn resolve_rate_or(&self, code: Option<&str>, fallback: TaxRate) -> TaxRate {
        code.and_then(|c| self.lookup(c))
            .map(|entry| entry.rate)
            .unwrap_or(fallback)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in HSN code order.
    pub fn iter(&self) -> btree_map::Values<'_, String, TaxRateEntry> {
        self.entries.values()
    }
}

impl Default for TaxRateTable {
    fn default() -> Self {
        Self::restaurant_defaults()
    }
}

impl RateSource for TaxRateTable {
    fn rate_for(&self, code: Option<&str>) -> TaxRate {
        self.resolve_rate(code)
    }
}

/// Resolves the GST rate for an item's HSN code.
///
/// Unknown or missing codes silently fall back to 18%; a bill is never
/// blocked on missing tax metadata.
///
/// ```rust
/// use bistro_core::tax::{resolve_rate, TaxRateTable};
/// use bistro_core::types::TaxRate;
///
/// let table = TaxRateTable::default();
/// assert_eq!(resolve_rate(&table, Some("0401")), TaxRate::from_bps(500));
/// assert_eq!(resolve_rate(&table, Some("nonexistent-code")), TaxRate::STANDARD);
/// assert_eq!(resolve_rate(&table, None), TaxRate::STANDARD);
/// ```
pub fn resolve_rate(table: &TaxRateTable, code: Option<&str>) -> TaxRate {
    table.resolve_rate(code)
}

/// The categories behind [`TaxRateTable::restaurant_defaults`].
pub fn default_categories() -> Vec<TaxCategory> {
    fn category(name: &str, entries: &[(&str, &str, u32)]) -> TaxCategory {
        TaxCategory {
            name: name.to_string(),
            entries: entries
                .iter()
                .map(|(code, description, bps)| {
                    TaxRateEntry::new(*code, *description, TaxRate::from_bps(*bps))
                })
                .collect(),
        }
    }

    vec![
        category(
            "Dairy",
            &[
                ("0401", "Milk and cream, not concentrated", 500),
                ("0403", "Curd, buttermilk and lassi", 500),
                ("0405", "Butter and ghee", 1200),
                ("0406", "Cheese and paneer", 1200),
            ],
        ),
        category(
            "Staples",
            &[
                ("0713", "Dried leguminous vegetables (dal)", 0),
                ("0902", "Tea", 500),
                ("0910", "Ginger, turmeric and spices", 500),
                ("1006", "Rice", 500),
            ],
        ),
        category(
            "Bakery & Confectionery",
            &[
                ("1704", "Sugar confectionery", 1800),
                ("1806", "Chocolate and cocoa preparations", 1800),
                ("1905", "Bread, pastry, cakes and biscuits", 1800),
            ],
        ),
        category(
            "Prepared Food & Beverages",
            &[
                ("2101", "Coffee and tea extracts", 1800),
                ("2105", "Ice cream", 1800),
                ("2106", "Food preparations not elsewhere specified", 1800),
                ("2201", "Packaged drinking water", 1800),
                ("2202", "Aerated and sweetened beverages", 2800),
            ],
        ),
        category(
            "Services",
            &[
                ("9963", "Restaurant and catering services", 500),
                ("996331", "Restaurant services (dine-in and takeaway)", 500),
            ],
        ),
    ]
}

// =============================================================================
// Tax Split
// =============================================================================

/// CGST / SGST / IGST components of a tax amount.
///
/// `total == cgst + sgst + igst` always holds. For an intra-state
/// supply `igst` is zero; for an inter-state supply `cgst` and `sgst` are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub total: Money,
}

impl TaxBreakdown {
    pub const fn zero() -> Self {
        TaxBreakdown {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: Money::zero(),
            total: Money::zero(),
        }
    }
}

impl Add for TaxBreakdown {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        TaxBreakdown {
            cgst: self.cgst + other.cgst,
            sgst: self.sgst + other.sgst,
            igst: self.igst + other.igst,
            total: self.total + other.total,
        }
    }
}

impl AddAssign for TaxBreakdown {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Computes GST on a taxable amount and splits it by jurisdiction.
///
/// `total = taxable × rate / 100`, kept at full precision.
///
/// ```rust
/// use bistro_core::tax::split_tax;
/// use bistro_core::types::{Jurisdiction, TaxRate};
/// use bistro_core::Money;
///
/// let tax = split_tax(Money::from_rupees(100), TaxRate::STANDARD, Jurisdiction::IntraState);
/// assert_eq!(tax.cgst, Money::from_rupees(9));
/// assert_eq!(tax.sgst, Money::from_rupees(9));
/// assert!(tax.igst.is_zero());
/// ```
pub fn split_tax(taxable: Money, rate: TaxRate, jurisdiction: Jurisdiction) -> TaxBreakdown {
    let total = taxable.apply_rate(rate);

    match jurisdiction {
        Jurisdiction::InterState => TaxBreakdown {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: total,
            total,
        },
        Jurisdiction::IntraState => {
            let half = total.half();
            TaxBreakdown {
                cgst: half,
                sgst: half,
                igst: Money::zero(),
                total: half + half,
            }
        }
    }
}

/// Splits a tax-inclusive price into its taxable part and its GST.
///
/// For menus printed with tax included: `taxable = gross × 100 / (100 + rate)`
/// and the tax is whatever remains, so `taxable + tax.total == gross`
/// exactly.
///
/// ```rust
/// use bistro_core::tax::split_inclusive_tax;
/// use bistro_core::types::{Jurisdiction, TaxRate};
/// use bistro_core::Money;
///
/// let (taxable, tax) =
///     split_inclusive_tax(Money::from_rupees(118), TaxRate::STANDARD, Jurisdiction::InterState);
/// assert_eq!(taxable, Money::from_rupees(100));
/// assert_eq!(tax.igst, Money::from_rupees(18));
/// ```
pub fn split_inclusive_tax(
    gross: Money,
    rate: TaxRate,
    jurisdiction: Jurisdiction,
) -> (Money, TaxBreakdown) {
    let hundred = Decimal::ONE_HUNDRED;
    let divisor = hundred.saturating_add(rate.percent());
    if divisor.is_zero() {
        return (gross, TaxBreakdown::zero());
    }

    // Scale up first for exactness; near the Decimal limit, divide first.
    let amount = gross.amount();
    let taxable = amount
        .checked_mul(hundred)
        .and_then(|scaled| scaled.checked_div(divisor))
        .or_else(|| amount.checked_div(divisor).map(|q| q.saturating_mul(hundred)))
        .unwrap_or(amount);
    let taxable = Money::new(taxable);
    let total = gross - taxable;

    let tax = match jurisdiction {
        Jurisdiction::InterState => TaxBreakdown {
            cgst: Money::zero(),
            sgst: Money::zero(),
            igst: total,
            total,
        },
        Jurisdiction::IntraState => {
            let cgst = total.half();
            TaxBreakdown {
                cgst,
                sgst: total - cgst,
                igst: Money::zero(),
                total,
            }
        }
    };

    (taxable, tax)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn money(s: &str) -> Money {
        Money::new(s.parse::<Decimal>().unwrap())
    }

    #[test]
    fn test_known_codes_resolve_to_configured_rate() {
        let table = TaxRateTable::default();
        assert_eq!(table.resolve_rate(Some("1905")), TaxRate::from_bps(1800));
        assert_eq!(table.resolve_rate(Some("0401")), TaxRate::from_bps(500));
        assert_eq!(table.resolve_rate(Some("2106")), TaxRate::from_bps(1800));
        assert_eq!(table.resolve_rate(Some("2202")), TaxRate::from_bps(2800));
    }

    #[test]
    fn test_unknown_or_missing_code_falls_back_to_standard() {
        let table = TaxRateTable::default();
        assert_eq!(table.resolve_rate(Some("nonexistent-code")), TaxRate::STANDARD);
        assert_eq!(table.resolve_rate(None), TaxRate::STANDARD);
        assert_eq!(TaxRateTable::empty().resolve_rate(Some("0401")), TaxRate::STANDARD);
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let table = TaxRateTable::default();
        assert!(table.lookup("19").is_none());
        assert!(table.lookup("19050").is_none());
        assert!(table.lookup(" 1905").is_none());
        assert_eq!(
            table.lookup("1905").map(|e| e.description.as_str()),
            Some("Bread, pastry, cakes and biscuits")
        );
    }

    #[test]
    fn test_resolve_rate_or_uses_custom_fallback() {
        let table = TaxRateTable::default();
        let fallback = TaxRate::from_bps(500);
        assert_eq!(table.resolve_rate_or(Some("unknown"), fallback), fallback);
        assert_eq!(table.resolve_rate_or(Some("1905"), fallback), TaxRate::STANDARD);
    }

    #[test]
    fn test_default_categories_have_no_duplicates() {
        let table = TaxRateTable::from_categories(default_categories()).unwrap();
        assert_eq!(table, TaxRateTable::restaurant_defaults());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let categories = vec![
            TaxCategory {
                name: "Bakery".to_string(),
                entries: vec![TaxRateEntry::new("1905", "Bread", TaxRate::from_bps(1800))],
            },
            TaxCategory {
                name: "Desserts".to_string(),
                entries: vec![TaxRateEntry::new("1905", "Cake", TaxRate::from_bps(500))],
            },
        ];

        let err = TaxRateTable::from_categories(categories).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DuplicateHsnCode { ref code, ref first_category, ref second_category }
                if code == "1905" && first_category == "Bakery" && second_category == "Desserts"
        ));
    }

    #[test]
    fn test_out_of_range_rate_rejected() {
        let categories = vec![TaxCategory {
            name: "Broken".to_string(),
            entries: vec![TaxRateEntry::new("9999", "Typo", TaxRate::from_bps(18_000))],
        }];
        let err = TaxRateTable::from_categories(categories).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTaxRate { ref code, ref source, .. }
                if code == "9999" && matches!(source, ValidationError::OutOfRange { .. })
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_iter_is_code_ordered() {
        let table = TaxRateTable::default();
        let codes: Vec<&str> = table.iter().map(|e| e.code.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort_unstable();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_split_intra_state() {
        let tax = split_tax(money("178.99"), TaxRate::STANDARD, Jurisdiction::IntraState);
        assert_eq!(tax.total, money("32.2182"));
        assert_eq!(tax.cgst, money("16.1091"));
        assert_eq!(tax.sgst, money("16.1091"));
        assert!(tax.igst.is_zero());
    }

    #[test]
    fn test_split_inter_state() {
        let tax = split_tax(money("178.99"), TaxRate::STANDARD, Jurisdiction::InterState);
        assert_eq!(tax.igst, money("32.2182"));
        assert_eq!(tax.total, tax.igst);
        assert!(tax.cgst.is_zero());
        assert!(tax.sgst.is_zero());
    }

    #[test]
    fn test_split_zero_rate() {
        let tax = split_tax(money("50"), TaxRate::zero(), Jurisdiction::IntraState);
        assert_eq!(tax, TaxBreakdown::zero());
    }

    #[test]
    fn test_breakdown_accumulates() {
        let mut acc = TaxBreakdown::zero();
        acc += split_tax(money("18.99"), TaxRate::STANDARD, Jurisdiction::IntraState);
        acc += split_tax(money("160"), TaxRate::STANDARD, Jurisdiction::IntraState);
        assert_eq!(acc.cgst, money("16.1091"));
        assert_eq!(acc.total, acc.cgst + acc.sgst + acc.igst);
    }

    #[test]
    fn test_split_inclusive_intra_state() {
        let (taxable, tax) =
            split_inclusive_tax(money("105"), TaxRate::from_bps(500), Jurisdiction::IntraState);
        assert_eq!(taxable, money("100"));
        assert_eq!(tax.cgst, money("2.5"));
        assert_eq!(tax.sgst, money("2.5"));
        assert_eq!(taxable + tax.total, money("105"));
    }

    #[test]
    fn test_split_tax_on_huge_amount_does_not_panic() {
        let huge = Money::new(Decimal::from_i128_with_scale(10i128.pow(28), 0));
        let tax = split_tax(huge, TaxRate::STANDARD, Jurisdiction::InterState);
        assert_eq!(tax.igst.amount(), Decimal::from_i128_with_scale(18 * 10i128.pow(26), 0));
        assert_eq!(tax.total, tax.igst);

        let tax = split_tax(Money::new(Decimal::MAX), TaxRate::STANDARD, Jurisdiction::IntraState);
        assert_eq!(tax.cgst, tax.sgst);
        assert!(tax.total > Money::zero());
    }

    #[test]
    fn test_split_inclusive_on_huge_amount_does_not_panic() {
        let gross = Money::new(Decimal::MAX);
        let (taxable, tax) = split_inclusive_tax(gross, TaxRate::STANDARD, Jurisdiction::InterState);
        assert!(taxable < gross);
        assert!(taxable > Money::zero());
        assert_eq!(tax.total, tax.igst);
    }

    #[test]
    fn test_split_inclusive_reconstructs_gross() {
        let gross = money("99.99");
        let (taxable, tax) = split_inclusive_tax(gross, TaxRate::STANDARD, Jurisdiction::IntraState);
        assert_eq!(taxable + tax.total, gross);
        assert_eq!(tax.cgst + tax.sgst, tax.total);
    }
}
