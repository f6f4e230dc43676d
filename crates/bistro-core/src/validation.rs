//! # Validation Module
//!
//! Input validation for order entry.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Billing UI                                                   │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate cashier feedback                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Order entry (Rust)                                           │
//! │  └── THIS MODULE: business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: billing::aggregate                                           │
//! │  └── NO validation. Computes whatever it is given.                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::{validate_hsn_code, validate_quantity};
//!
//! assert!(validate_hsn_code("1905").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Discount, LineItem, TaxRate};
use crate::{MAX_BILL_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (complimentary items)
///
/// ```rust
/// use bistro_core::validation::validate_price;
/// use bistro_core::Money;
///
/// assert!(validate_price(Money::from_paise(1899)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_rupees(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a discount against the line it applies to.
///
/// ## Rules
/// - Percentage: fraction between 0 and 1
/// - Absolute: non-negative and not more than the line total
pub fn validate_discount(discount: &Discount, line_total: Money) -> ValidationResult<()> {
    match discount {
        Discount::Percentage(fraction) => {
            if (fraction.is_sign_negative() && !fraction.is_zero()) || *fraction > Decimal::ONE {
                return Err(ValidationError::OutOfRange {
                    field: "discount".to_string(),
                    min: "0".to_string(),
                    max: "1".to_string(),
                });
            }
        }
        Discount::Absolute(amount) => {
            if amount.is_negative() {
                return Err(ValidationError::MustNotBeNegative {
                    field: "discount".to_string(),
                });
            }
            if *amount > line_total {
                return Err(ValidationError::DiscountExceedsTotal {
                    discount: amount.amount().to_string(),
                    line_total: line_total.amount().to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be between 0% and 100%
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    let percent = rate.percent();
    if (percent.is_sign_negative() && !percent.is_zero()) || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: "0".to_string(),
            max: "100".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an HSN / SAC code.
///
/// ## Rules
/// - Must not be empty
/// - ASCII digits only
/// - 2, 4, 6 or 8 digits (chapter, heading, sub-heading, tariff item)
pub fn validate_hsn_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "hsn_code".to_string(),
        });
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    if !matches!(code.len(), 2 | 4 | 6 | 8) {
        return Err(ValidationError::InvalidFormat {
            field: "hsn_code".to_string(),
            reason: "must be 2, 4, 6 or 8 digits long".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates every field of a line item, stopping at the first failure.
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_price(item.price)?;
    validate_quantity(item.quantity)?;

    if let Some(discount) = &item.discount {
        validate_discount(discount, item.line_total())?;
    }

    if let Some(code) = &item.hsn_code {
        validate_hsn_code(code)?;
    }

    Ok(())
}

/// Validates bill size (number of lines).
///
/// ## Rules
/// - Must not exceed MAX_BILL_ITEMS (200)
pub fn validate_bill_size(line_count: usize) -> ValidationResult<()> {
    if line_count > MAX_BILL_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "bill lines".to_string(),
            min: "0".to_string(),
            max: MAX_BILL_ITEMS.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_discount() {
        let line_total = Money::from_rupees(200);

        assert!(validate_discount(&Discount::Percentage(dec("0")), line_total).is_ok());
        assert!(validate_discount(&Discount::Percentage(dec("1")), line_total).is_ok());
        assert!(validate_discount(&Discount::Percentage(dec("-0.1")), line_total).is_err());
        assert!(validate_discount(&Discount::Percentage(dec("1.5")), line_total).is_err());

        assert!(validate_discount(&Discount::Absolute(Money::from_rupees(200)), line_total).is_ok());
        assert!(validate_discount(&Discount::Absolute(Money::from_rupees(-5)), line_total).is_err());
        assert_eq!(
            validate_discount(&Discount::Absolute(Money::from_rupees(201)), line_total),
            Err(ValidationError::DiscountExceedsTotal {
                discount: "201".to_string(),
                line_total: "200".to_string(),
            })
        );
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::zero()).is_ok());
        assert!(validate_tax_rate(TaxRate::STANDARD).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10_000)).is_ok());
        assert!(validate_tax_rate(TaxRate::from_bps(10_001)).is_err());
        assert!(validate_tax_rate(TaxRate::from_percent(dec("-1"))).is_err());
    }

    #[test]
    fn test_validate_hsn_code() {
        assert!(validate_hsn_code("19").is_ok());
        assert!(validate_hsn_code("1905").is_ok());
        assert!(validate_hsn_code("996331").is_ok());
        assert!(validate_hsn_code("19059010").is_ok());

        assert!(validate_hsn_code("").is_err());
        assert!(validate_hsn_code("   ").is_err());
        assert!(validate_hsn_code("190").is_err());
        assert!(validate_hsn_code("19A5").is_err());
        assert!(validate_hsn_code("nonexistent-code").is_err());
    }

    #[test]
    fn test_validate_line_item() {
        let ok = LineItem::new(Money::from_rupees(80), 2)
            .with_hsn_code("1905")
            .with_discount(Discount::from_magnitude(dec("50")));
        assert!(validate_line_item(&ok).is_ok());

        let bad_qty = LineItem::new(Money::from_rupees(80), 0);
        assert!(matches!(
            validate_line_item(&bad_qty),
            Err(ValidationError::MustBePositive { .. })
        ));

        let bad_price = LineItem::new(Money::from_rupees(-80), 1);
        assert!(matches!(
            validate_line_item(&bad_price),
            Err(ValidationError::MustNotBeNegative { .. })
        ));
    }

    #[test]
    fn test_validate_bill_size() {
        assert!(validate_bill_size(0).is_ok());
        assert!(validate_bill_size(MAX_BILL_ITEMS).is_ok());
        assert!(validate_bill_size(MAX_BILL_ITEMS + 1).is_err());
    }
}
