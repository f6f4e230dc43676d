//! # Billing Module
//!
//! Aggregates line items into a [`BillSummary`].
//!
//! ## Per-Line Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem                                                               │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  line_total = price × quantity                                          │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  discount   = Percentage → line_total × fraction                        │
//! │               Absolute   → amount (not clamped)                         │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  taxable    = line_total − discount                                     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  rate       = RateSource::rate_for(hsn_code)                            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  tax        = split_tax(taxable, rate, jurisdiction)                    │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  subtotal += taxable, total_discount += discount, tax += tax            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `BillSummary` is a projection of its inputs. Any change to the items
//! means calling [`aggregate`] again; summaries are never patched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;
use crate::tax::{split_tax, RateSource, TaxBreakdown};
use crate::types::{Jurisdiction, LineItem, TaxRate};

// =============================================================================
// Bill Line
// =============================================================================

/// Computed figures for one line, in the same order as the input items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillLine {
    /// Price × quantity.
    pub line_total: Money,
    /// Discount actually applied.
    pub discount: Money,
    /// Line total after discount, before tax.
    pub taxable: Money,
    /// Rate resolved from the HSN code.
    pub rate: TaxRate,
    pub tax: TaxBreakdown,
}

impl BillLine {
    /// Computes one line without accumulating it.
    pub fn compute<R>(rates: &R, item: &LineItem, jurisdiction: Jurisdiction) -> Self
    where
        R: RateSource + ?Sized,
    {
        let line_total = item.line_total();
        let discount = item.discount_amount();
        let taxable = line_total - discount;
        let rate = rates.rate_for(item.hsn_code.as_deref());

        BillLine {
            line_total,
            discount,
            taxable,
            rate,
            tax: split_tax(taxable, rate, jurisdiction),
        }
    }

    /// Taxable amount plus tax.
    pub fn total(&self) -> Money {
        self.taxable + self.tax.total
    }
}

// =============================================================================
// Bill Summary
// =============================================================================

/// The monetary summary of a bill.
///
/// ## Invariants
/// - `grand_total == subtotal + tax_breakdown.total`
/// - `tax_breakdown.total == cgst + sgst + igst`
/// - `InterState` ⇒ `cgst == sgst == 0`; `IntraState` ⇒ `igst == 0`
/// - `lines[i]` is computed from `items[i]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    pub items: Vec<LineItem>,
    pub lines: Vec<BillLine>,
    pub jurisdiction: Jurisdiction,
    pub subtotal: Money,
    pub total_discount: Money,
    pub tax_breakdown: TaxBreakdown,
    pub grand_total: Money,
}

impl BillSummary {
    /// Groups taxable amounts and tax by rate, lowest rate first.
    ///
    /// This is the rate-wise summary printed at the foot of a GST invoice.
    pub fn rate_summary(&self) -> Vec<RateSummary> {
        let mut by_rate: BTreeMap<TaxRate, RateSummary> = BTreeMap::new();

        for line in &self.lines {
            let entry = by_rate.entry(line.rate).or_insert_with(|| RateSummary {
                rate: line.rate,
                line_count: 0,
                taxable: Money::zero(),
                tax: TaxBreakdown::zero(),
            });
            entry.line_count += 1;
            entry.taxable += line.taxable;
            entry.tax += line.tax;
        }

        by_rate.into_values().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Totals for all lines sharing one GST rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RateSummary {
    pub rate: TaxRate,
    #[ts(type = "number")]
    pub line_count: usize,
    pub taxable: Money,
    pub tax: TaxBreakdown,
}

/// Aggregates line items into a bill summary.
///
/// Pure and deterministic: no validation, no rounding, no failure.
/// Negative prices, zero quantities and oversized discounts are computed
/// exactly as given; validating them is the caller's job (see
/// [`crate::validation`]). Amounts beyond the `Decimal` range saturate
/// (see [`crate::money`]) instead of panicking.
///
/// ```rust
/// use bistro_core::billing::aggregate;
/// use bistro_core::tax::TaxRateTable;
/// use bistro_core::types::{Jurisdiction, LineItem};
/// use bistro_core::Money;
///
/// let table = TaxRateTable::default();
/// let items = vec![
///     LineItem::new(Money::from_paise(1899), 1).with_hsn_code("2106"),
///     LineItem::new(Money::from_rupees(80), 2).with_hsn_code("1905"),
/// ];
///
/// let bill = aggregate(&table, &items, Jurisdiction::IntraState);
/// assert_eq!(bill.subtotal, Money::from_paise(17899));
/// assert_eq!(bill.grand_total, bill.subtotal + bill.tax_breakdown.total);
/// ```
pub fn aggregate<R>(rates: &R, items: &[LineItem], jurisdiction: Jurisdiction) -> BillSummary
where
    R: RateSource + ?Sized,
{
    let mut lines = Vec::with_capacity(items.len());
    let mut subtotal = Money::zero();
    let mut total_discount = Money::zero();
    let mut tax_breakdown = TaxBreakdown::zero();

    for item in items {
        let line = BillLine::compute(rates, item, jurisdiction);
        subtotal += line.taxable;
        total_discount += line.discount;
        tax_breakdown += line.tax;
        lines.push(line);
    }

    BillSummary {
        items: items.to_vec(),
        lines,
        jurisdiction,
        subtotal,
        total_discount,
        tax_breakdown,
        grand_total: subtotal + tax_breakdown.total,
    }
}

// =============================================================================
// Display Totals
// =============================================================================

/// Bill totals rounded to paise for display and persistence.
///
/// Each field is rounded independently from the exact summary, so
/// `grand_total` may differ from `subtotal + tax_total` by a paisa. The
/// exact figures stay on [`BillSummary`]. `total_quantity` saturates at
/// `i64::MAX` like every other sum in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    #[ts(type = "number")]
    pub item_count: usize,
    #[ts(type = "number")]
    pub total_quantity: i64,
    pub subtotal: Money,
    pub total_discount: Money,
    pub cgst: Money,
    pub sgst: Money,
    pub igst: Money,
    pub tax_total: Money,
    pub grand_total: Money,
}

impl From<&BillSummary> for BillTotals {
    fn from(bill: &BillSummary) -> Self {
        BillTotals {
            item_count: bill.items.len(),
            total_quantity: bill
                .items
                .iter()
                .fold(0i64, |acc, item| acc.saturating_add(item.quantity)),
            subtotal: bill.subtotal.round_to_paise(),
            total_discount: bill.total_discount.round_to_paise(),
            cgst: bill.tax_breakdown.cgst.round_to_paise(),
            sgst: bill.tax_breakdown.sgst.round_to_paise(),
            igst: bill.tax_breakdown.igst.round_to_paise(),
            tax_total: bill.tax_breakdown.total.round_to_paise(),
            grand_total: bill.grand_total.round_to_paise(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
