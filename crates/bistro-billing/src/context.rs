//! # Billing Context
//!
//! The one object the dashboard holds to compute bills.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  BillingConfig ──► BillingContext::from_config() ──► Arc<BillingContext>│
//! │                          │                                              │
//! │                          ├── TaxRateTable (immutable)                   │
//! │                          ├── fallback rate                              │
//! │                          └── store state code                           │
//! │                                                                         │
//! │  compute_bill_for(items, "07") ──► InterState ──► aggregate()           │
//! │  compute_bill_for(items, "29") ──► IntraState ──► aggregate()           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Built once at startup and passed explicitly; there is no global
//! instance. Nothing in here mutates after construction, so the context
//! is `Send + Sync` and can be shared behind an `Arc`.

use bistro_core::billing::aggregate;
use bistro_core::tax::{self, RateSource, TaxRateTable};
use bistro_core::{BillSummary, Jurisdiction, LineItem, Money, TaxBreakdown, TaxRate};
use tracing::debug;

use crate::config::{is_state_code, BillingConfig};
use crate::error::{BillingError, BillingResult};

#[derive(Debug, Clone)]
pub struct BillingContext {
    table: TaxRateTable,
    fallback_rate: TaxRate,
    state_code: String,
}

impl BillingContext {
    /// Creates a context from parts.
    ///
    /// ## Errors
    /// [`BillingError::InvalidConfig`] if `state_code` is not two digits.
    pub fn new(
        table: TaxRateTable,
        fallback_rate: TaxRate,
        state_code: impl Into<String>,
    ) -> BillingResult<Self> {
        let state_code = state_code.into();
        if !is_state_code(&state_code) {
            return Err(BillingError::InvalidConfig(format!(
                "state_code must be two digits, got: '{}'",
                state_code
            )));
        }

        Ok(BillingContext {
            table,
            fallback_rate,
            state_code,
        })
    }

    /// Validates the config and builds its rate table.
    pub fn from_config(config: &BillingConfig) -> BillingResult<Self> {
        config.validate()?;
        let table = config.build_rate_table()?;

        debug!(
            entries = table.len(),
            fallback = %config.fallback_tax_rate(),
            state_code = %config.state_code(),
            "Billing context ready"
        );

        Self::new(table, config.fallback_tax_rate(), config.state_code())
    }

    pub fn table(&self) -> &TaxRateTable {
        &self.table
    }

    pub fn fallback_rate(&self) -> TaxRate {
        self.fallback_rate
    }

    pub fn state_code(&self) -> &str {
        &self.state_code
    }

    /// Rate for an HSN code, using the configured fallback.
    pub fn resolve_rate(&self, code: Option<&str>) -> TaxRate {
        self.table.resolve_rate_or(code, self.fallback_rate)
    }

    pub fn split_tax(&self, taxable: Money, rate: TaxRate, jurisdiction: Jurisdiction) -> TaxBreakdown {
        tax::split_tax(taxable, rate, jurisdiction)
    }

    /// Computes a bill for an explicit jurisdiction.
    pub fn compute_bill(&self, items: &[LineItem], jurisdiction: Jurisdiction) -> BillSummary {
        let bill = aggregate(self, items, jurisdiction);

        debug!(
            items = items.len(),
            ?jurisdiction,
            subtotal = %bill.subtotal.amount(),
            tax = %bill.tax_breakdown.total.amount(),
            grand_total = %bill.grand_total.amount(),
            "Bill computed"
        );

        bill
    }

    /// Jurisdiction for a customer's place of supply.
    ///
    /// Inter-state only when the customer's state code is known and
    /// differs from the store's. A missing or blank place of supply is a
    /// walk-in customer, billed intra-state.
    pub fn jurisdiction_for(&self, place_of_supply: Option<&str>) -> Jurisdiction {
        let inter_state = place_of_supply
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .is_some_and(|code| code != self.state_code);
        Jurisdiction::from_inter_state(inter_state)
    }

    /// Computes a bill, deriving the jurisdiction from the place of supply.
    pub fn compute_bill_for(&self, items: &[LineItem], place_of_supply: Option<&str>) -> BillSummary {
        let jurisdiction = self.jurisdiction_for(place_of_supply);
        debug!(place_of_supply = ?place_of_supply, ?jurisdiction, "Resolved place of supply");
        self.compute_bill(items, jurisdiction)
    }
}

impl Default for BillingContext {
    fn default() -> Self {
        BillingContext {
            table: TaxRateTable::default(),
            fallback_rate: TaxRate::STANDARD,
            state_code: "29".to_string(),
        }
    }
}

impl RateSource for BillingContext {
    fn rate_for(&self, code: Option<&str>) -> TaxRate {
        self.resolve_rate(code)
    }
}
