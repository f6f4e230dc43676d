//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Rate table construction failures               │
//! │  └── ValidationError  - Caller-side input validation failures          │
//! │                                                                         │
//! │  bistro-billing errors (separate crate)                                │
//! │  └── BillingError     - Config file / environment failures             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError (source) → BillingError → dashboard │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bill calculation itself never returns an error. Unknown HSN codes fall
//! back to the standard rate and malformed numbers are computed as given.
//! Errors only exist at the edges: building a rate table at startup, and
//! order entry validating what a cashier typed.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while assembling domain data at startup.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The same HSN code is listed twice in the rate table.
    ///
    /// ## When This Occurs
    /// - A config file repeats a code inside one category
    /// - Two categories both claim the same code
    ///
    /// Lookup is exact-match on a flat table, so a duplicate would make
    /// the effective rate depend on load order.
    #[error("HSN code {code} is listed in both '{first_category}' and '{second_category}'")]
    DuplicateHsnCode {
        code: String,
        first_category: String,
        second_category: String,
    },

    /// A rate table entry has a rate outside 0-100%.
    #[error("Invalid tax rate {rate}% for HSN code {code}: {source}")]
    InvalidTaxRate {
        code: String,
        rate: String,
        #[source]
        source: ValidationError,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by [`crate::validation`]; the calculator never produces these
/// itself.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. an HSN code with letters in it).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// An absolute discount larger than the line it applies to.
    #[error("discount {discount} exceeds line total {line_total}")]
    DiscountExceedsTotal {
        discount: String,
        line_total: String,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
