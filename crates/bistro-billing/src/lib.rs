//! # bistro-billing: Configured Billing for the Bistro Back Office
//!
//! Wraps the pure calculator in `bistro-core` with everything that touches
//! the outside world: the `billing.toml` file, environment overrides and
//! logging.
//!
//! ## Module Organization
//! ```text
//! bistro_billing/
//! ├── lib.rs          ◄─── You are here
//! ├── config.rs       ◄─── BillingConfig (defaults → TOML → env → validate)
//! ├── context.rs      ◄─── BillingContext (rate table + store state code)
//! ├── telemetry.rs    ◄─── tracing-subscriber setup
//! └── error.rs        ◄─── BillingError
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_billing::{BillingConfig, BillingContext};
//! use bistro_core::{LineItem, Money};
//!
//! let context = BillingContext::from_config(&BillingConfig::default()).unwrap();
//! let items = vec![LineItem::new(Money::from_rupees(100), 1).with_hsn_code("0401")];
//!
//! let local = context.compute_bill_for(&items, Some("29"));
//! assert_eq!(local.tax_breakdown.cgst, Money::new("2.5".parse().unwrap()));
//!
//! let delhi = context.compute_bill_for(&items, Some("07"));
//! assert_eq!(delhi.tax_breakdown.igst, Money::from_rupees(5));
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod telemetry;

pub use config::{BillingConfig, BillingSettings, StoreConfig};
pub use context::BillingContext;
pub use error::{BillingError, BillingResult};
pub use telemetry::init_tracing;
