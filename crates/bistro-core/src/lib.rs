//! # bistro-core: Pure Billing Logic for the Bistro Back Office
//!
//! This crate is the calculation engine behind the billing panel. It turns
//! a list of line items into a GST-compliant bill summary with pure
//! functions and zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bistro Back Office                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard Panels                             │   │
//! │  │    Billing UI ──► Invoice Preview ──► Export                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ LineItem[] + inter-state flag         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bistro-billing (BillingContext)                 │   │
//! │  │    config, rate table, place of supply, logging                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │   tax   │ │ billing │ │ format  │  │   │
//! │  │   │LineItem │ │  Money  │ │RateTable│ │aggregate│ │  ₹ and  │  │   │
//! │  │   │Discount │ │         │ │split_tax│ │  Bill   │ │  words  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, discounts, tax rates, jurisdiction
//! - [`money`] - Exact decimal rupee amounts
//! - [`tax`] - HSN rate table, rate resolution, CGST/SGST/IGST split
//! - [`billing`] - Bill aggregation and display totals
//! - [`format`] - Rupee formatting and amount-in-words
//! - [`validation`] - Order-entry validation (the calculator never validates)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **Never Fails**: unknown HSN codes fall back to 18%, odd numbers are
//!    computed as given
//! 3. **Exact Money**: every amount is a base-10 decimal
//! 4. **Round Once**: only display helpers round, never the calculation
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::billing::aggregate;
//! use bistro_core::tax::TaxRateTable;
//! use bistro_core::{Jurisdiction, LineItem, Money};
//!
//! let table = TaxRateTable::default();
//! let items = vec![
//!     LineItem::new(Money::from_paise(1899), 1).with_hsn_code("2106"),
//!     LineItem::new(Money::from_rupees(80), 2).with_hsn_code("1905"),
//! ];
//!
//! let bill = aggregate(&table, &items, Jurisdiction::from_inter_state(false));
//! assert_eq!(bill.tax_breakdown.cgst, bill.tax_breakdown.sgst);
//! assert_eq!(bill.grand_total.to_string(), "₹211.21");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod format;
pub mod money;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use billing::{aggregate, BillLine, BillSummary, BillTotals, RateSummary};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use tax::{resolve_rate, split_tax, RateSource, TaxBreakdown, TaxRateEntry, TaxRateTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines on a single bill.
///
/// Enforced by [`validation::validate_bill_size`] only; `aggregate`
/// accepts any number of lines.
pub const MAX_BILL_ITEMS: usize = 200;

/// Maximum quantity of a single line.
///
/// Catches typing 1000 instead of 10 at order entry.
pub const MAX_ITEM_QUANTITY: i64 = 999;
