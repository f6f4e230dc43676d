//! # Billing Configuration
//!
//! Store identity, fallback tax rate and the HSN rate table.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BISTRO_STATE_CODE=29                                               │
//! │     BISTRO_DEFAULT_TAX_RATE=18                                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/pos/billing.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.bistro.pos/billing.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Built-in restaurant rate table, 18% fallback, state 29             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # billing.toml
//! [store]
//! name = "Koramangala Kitchen"
//! gstin = "29ABCDE1234F1Z5"
//! state_code = "29"
//!
//! [billing]
//! fallback_tax_rate = "18"
//!
//! [[tax_table]]
//! name = "Dairy"
//!
//! [[tax_table.entries]]
//! code = "0401"
//! description = "Milk and cream"
//! rate = "5"
//! ```
//!
//! Leaving out `tax_table` keeps the built-in table. Supplying it replaces
//! the built-in table entirely.

use bistro_core::tax::{default_categories, TaxCategory, TaxRateTable};
use bistro_core::validation::validate_tax_rate;
use bistro_core::TaxRate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{BillingError, BillingResult};

/// Length of a GSTIN (two-digit state code + PAN + entity + check digit).
pub const GSTIN_LENGTH: usize = 15;

// =============================================================================
// Store Configuration
// =============================================================================

/// The outlet issuing the bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name printed on the invoice header.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// GST registration number, if the outlet is registered.
    #[serde(default)]
    pub gstin: Option<String>,

    /// Two-digit GST state code of the outlet.
    /// A customer with a different place of supply is billed IGST.
    #[serde(default = "default_state_code")]
    pub state_code: String,
}

fn default_store_name() -> String {
    "Bistro".to_string()
}

fn default_state_code() -> String {
    "29".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            name: default_store_name(),
            gstin: None,
            state_code: default_state_code(),
        }
    }
}

// =============================================================================
// Billing Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingSettings {
    /// Rate applied to items whose HSN code is missing or unknown.
    #[serde(default = "default_fallback_tax_rate")]
    pub fallback_tax_rate: TaxRate,
}

fn default_fallback_tax_rate() -> TaxRate {
    TaxRate::STANDARD
}

impl Default for BillingSettings {
    fn default() -> Self {
        BillingSettings {
            fallback_tax_rate: default_fallback_tax_rate(),
        }
    }
}

// =============================================================================
// Main Billing Configuration
// =============================================================================

/// Complete billing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub billing: BillingSettings,

    /// HSN categories. Flattened into a [`TaxRateTable`] at startup.
    #[serde(default = "default_categories")]
    pub tax_table: Vec<TaxCategory>,
}

impl Default for BillingConfig {
    fn default() -> Self {
        BillingConfig {
            store: StoreConfig::default(),
            billing: BillingSettings::default(),
            tax_table: default_categories(),
        }
    }
}

impl BillingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (billing.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> BillingResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading billing config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load billing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> BillingResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| BillingError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| BillingError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| BillingError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Billing config saved");
        Ok(())
    }

    /// Validates the configuration.
    ///
    /// The rate table itself is checked when it is built, see
    /// [`BillingConfig::build_rate_table`].
    pub fn validate(&self) -> BillingResult<()> {
        if !is_state_code(&self.store.state_code) {
            return Err(BillingError::InvalidConfig(format!(
                "state_code must be two digits, got: '{}'",
                self.store.state_code
            )));
        }

        if let Some(ref gstin) = self.store.gstin {
            if gstin.chars().count() != GSTIN_LENGTH {
                return Err(BillingError::InvalidConfig(format!(
                    "GSTIN must be {} characters, got: '{}'",
                    GSTIN_LENGTH, gstin
                )));
            }
            if !gstin.starts_with(&self.store.state_code) {
                return Err(BillingError::InvalidConfig(format!(
                    "GSTIN '{}' does not belong to state {}",
                    gstin, self.store.state_code
                )));
            }
        }

        if validate_tax_rate(self.billing.fallback_tax_rate).is_err() {
            return Err(BillingError::InvalidConfig(format!(
                "fallback_tax_rate must be between 0 and 100, got: {}",
                self.billing.fallback_tax_rate
            )));
        }

        Ok(())
    }

    /// Flattens `tax_table` into a lookup table.
    ///
    /// ## Errors
    /// [`BillingError::RateTable`] on duplicate HSN codes or out-of-range rates.
    pub fn build_rate_table(&self) -> BillingResult<TaxRateTable> {
        Ok(TaxRateTable::from_categories(self.tax_table.iter().cloned())?)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup; `apply_env_overrides` passes
    /// the process environment.
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("BISTRO_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(gstin) = lookup("BISTRO_STORE_GSTIN") {
            debug!(gstin = %gstin, "Overriding GSTIN from environment");
            self.store.gstin = if gstin.trim().is_empty() {
                None
            } else {
                Some(gstin.trim().to_uppercase())
            };
        }

        if let Some(code) = lookup("BISTRO_STATE_CODE") {
            debug!(state_code = %code, "Overriding state code from environment");
            self.store.state_code = code.trim().to_string();
        }

        if let Some(rate) = lookup("BISTRO_DEFAULT_TAX_RATE") {
            match rate.trim().parse::<Decimal>() {
                Ok(percent) => {
                    debug!(rate = %percent, "Overriding fallback tax rate from environment");
                    self.billing.fallback_tax_rate = TaxRate::from_percent(percent);
                }
                Err(_) => warn!(rate = %rate, "Ignoring unparsable tax rate in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bistro", "pos")
            .map(|dirs| dirs.config_dir().join("billing.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn state_code(&self) -> &str {
        &self.store.state_code
    }

    pub fn fallback_tax_rate(&self) -> TaxRate {
        self.billing.fallback_tax_rate
    }
}

/// True for a two-digit ASCII state code such as `"07"` or `"29"`.
pub(crate) fn is_state_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_digit())
}
