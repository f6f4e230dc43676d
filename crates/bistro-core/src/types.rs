//! # Domain Types
//!
//! Core domain types used throughout the billing engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    Discount     │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  price (Money)  │   │  Percentage     │   │  percent (dec)  │       │
//! │  │  quantity       │   │  Absolute       │   │  18 = 18%       │       │
//! │  │  discount?      │   └─────────────────┘   └─────────────────┘       │
//! │  │  hsn_code?      │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐                              │
//! │                        │  Jurisdiction   │  one per bill                │
//! │                        │  IntraState     │  → CGST + SGST               │
//! │                        │  InterState     │  → IGST                      │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// A GST rate expressed as a percentage (`18` means 18%).
///
/// Held as an exact decimal so fractional slabs (0.25%, 1.5%) are exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// The rate applied when an item has no HSN code or an unknown one.
    pub const STANDARD: TaxRate = TaxRate(Decimal::from_parts(18, 0, 0, false, 0));

    /// Creates a rate from a percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        TaxRate(percent)
    }

    /// Creates a rate from basis points (1800 = 18%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 2))
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate (exempt goods).
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Jurisdiction
// =============================================================================

/// Which GST split applies to a bill.
///
/// Chosen once per bill, never per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Jurisdiction {
    /// Supplier and customer in the same state: tax split into CGST + SGST.
    #[default]
    IntraState,
    /// Supply across state lines: all tax charged as IGST.
    InterState,
}

impl Jurisdiction {
    /// Maps the dashboard's `isInterState` flag.
    #[inline]
    pub const fn from_inter_state(is_inter_state: bool) -> Self {
        if is_inter_state {
            Jurisdiction::InterState
        } else {
            Jurisdiction::IntraState
        }
    }

    #[inline]
    pub const fn is_inter_state(&self) -> bool {
        matches!(self, Jurisdiction::InterState)
    }
}

impl From<bool> for Jurisdiction {
    fn from(is_inter_state: bool) -> Self {
        Jurisdiction::from_inter_state(is_inter_state)
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A per-line discount.
///
/// ## Wire Format
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Input                                   Meaning                        │
/// │  ─────────────────────────────────────   ─────────────────────────────  │
/// │  0.1                                     10% of the line               │
/// │  1                                       100% of the line              │
/// │  50                                      ₹50 off the line              │
/// │  {"kind":"percentage","value":"0.1"}     10% of the line               │
/// │  {"kind":"absolute","value":"1"}         ₹1 off the line               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Bare numbers follow the magnitude rule of [`Discount::from_magnitude`].
/// The tagged form is the only way to say "₹1 off", and it is what this
/// type serializes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Fraction of the line total, 0-1 (0.25 = 25%).
    Percentage(#[ts(type = "string")] Decimal),
    /// Fixed rupee amount taken off the line total.
    Absolute(Money),
}

impl Discount {
    /// Interprets a bare number: `≤ 1` is a fraction, `> 1` is rupees.
    ///
    /// ```rust
    /// use bistro_core::types::Discount;
    /// use bistro_core::Money;
    ///
    /// assert_eq!(Discount::from_magnitude("0.1".parse().unwrap()),
    ///            Discount::Percentage("0.1".parse().unwrap()));
    /// assert_eq!(Discount::from_magnitude("50".parse().unwrap()),
    ///            Discount::Absolute(Money::from_rupees(50)));
    /// ```
    pub fn from_magnitude(value: Decimal) -> Self {
        if value <= Decimal::ONE {
            Discount::Percentage(value)
        } else {
            Discount::Absolute(Money::new(value))
        }
    }

    /// The rupee amount this discount removes from `line_total`.
    ///
    /// Absolute discounts are not clamped to the line total.
    pub fn amount_for(&self, line_total: Money) -> Money {
        match self {
            Discount::Percentage(fraction) => line_total.fraction_of(*fraction),
            Discount::Absolute(amount) => *amount,
        }
    }
}

impl<'de> Deserialize<'de> for Discount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(tag = "kind", content = "value", rename_all = "snake_case")]
        enum Tagged {
            Percentage(Decimal),
            Absolute(Decimal),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Bare(Decimal),
            Tagged(Tagged),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Bare(value) => Discount::from_magnitude(value),
            Wire::Tagged(Tagged::Percentage(fraction)) => Discount::Percentage(fraction),
            Wire::Tagged(Tagged::Absolute(amount)) => Discount::Absolute(Money::new(amount)),
        })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line on a restaurant bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Menu item name, carried through for invoice rendering.
    #[serde(default)]
    pub name: Option<String>,

    /// Unit price before tax and discount.
    pub price: Money,

    /// Quantity ordered.
    #[ts(type = "number")]
    pub quantity: i64,

    /// Optional per-line discount.
    #[serde(default)]
    pub discount: Option<Discount>,

    /// HSN classification code selecting the GST rate.
    #[serde(default)]
    pub hsn_code: Option<String>,
}

impl LineItem {
    /// Creates a line with no name, discount or HSN code.
    pub fn new(price: Money, quantity: i64) -> Self {
        LineItem {
            name: None,
            price,
            quantity,
            discount: None,
            hsn_code: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_hsn_code(mut self, code: impl Into<String>) -> Self {
        self.hsn_code = Some(code.into());
        self
    }

    /// Unit price × quantity, before discount.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Discount removed from this line (zero when there is none).
    #[inline]
    pub fn discount_amount(&self) -> Money {
        self.discount
            .map(|d| d.amount_for(self.line_total()))
            .unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
