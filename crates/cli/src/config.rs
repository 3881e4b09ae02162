//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `MERCH_DATA_DIR` - Directory holding the persisted slices (default: ./data)
//! - `MERCH_KEY_PREFIX` - Namespace for the slice keys, e.g. `merch` stores
//!   the cart under `merch.cart`
//! - `MERCH_TAX_RATE` - Tax as a fraction of the subtotal (default: 0.18)
//! - `MERCH_SHIPPING_FEE` - Flat shipping for a non-empty cart (default: 60)

use std::path::PathBuf;
use std::str::FromStr;

use merch_shop_core::Price;
use merch_shop_store::{Pricing, SliceKeys};
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "./data";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory for the file-backed storage
    pub data_dir: PathBuf,
    /// Optional slice key namespace
    pub key_prefix: Option<String>,
    /// Tax and shipping for the cart summary
    pub pricing: Pricing,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("MERCH_DATA_DIR", DEFAULT_DATA_DIR));
        let key_prefix = get_optional_env("MERCH_KEY_PREFIX").filter(|p| !p.trim().is_empty());

        let tax_rate = get_optional_env("MERCH_TAX_RATE")
            .map(|raw| parse_tax_rate("MERCH_TAX_RATE", &raw))
            .transpose()?
            .unwrap_or(Pricing::DEFAULT_TAX_RATE);
        let shipping_fee = get_optional_env("MERCH_SHIPPING_FEE")
            .map(|raw| parse_fee("MERCH_SHIPPING_FEE", &raw))
            .transpose()?
            .unwrap_or_else(|| Price::whole(Pricing::DEFAULT_SHIPPING_FEE));

        Ok(Self {
            data_dir,
            key_prefix,
            pricing: Pricing {
                tax_rate,
                shipping_fee,
            },
        })
    }

    /// Storage keys for the three slices.
    #[must_use]
    pub fn slice_keys(&self) -> SliceKeys {
        self.key_prefix
            .as_deref()
            .map_or_else(SliceKeys::default, SliceKeys::with_prefix)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a tax rate, which must lie in `0..=1`.
fn parse_tax_rate(key: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let rate = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if rate.is_sign_negative() || rate > Decimal::ONE {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("{rate} is not between 0 and 1"),
        ));
    }
    Ok(rate)
}

/// Parse a non-negative money amount.
fn parse_fee(key: &str, raw: &str) -> Result<Price, ConfigError> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Price::new(amount).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tax_rate() {
        assert_eq!(
            parse_tax_rate("T", " 0.05 ").unwrap(),
            Decimal::new(5, 2)
        );
        assert_eq!(parse_tax_rate("T", "0").unwrap(), Decimal::ZERO);
        assert_eq!(parse_tax_rate("T", "1").unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_parse_tax_rate_out_of_range() {
        assert!(matches!(
            parse_tax_rate("T", "1.5"),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "T"
        ));
        assert!(parse_tax_rate("T", "-0.1").is_err());
        assert!(parse_tax_rate("T", "eighteen").is_err());
    }

    #[test]
    fn test_parse_fee() {
        assert_eq!(parse_fee("F", "40").unwrap(), Price::whole(40));
        assert_eq!(parse_fee("F", "0").unwrap(), Price::ZERO);
        assert!(parse_fee("F", "-10").is_err());
        assert!(parse_fee("F", "free").is_err());
    }

    #[test]
    fn test_slice_keys_follow_prefix() {
        let mut config = CliConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            key_prefix: None,
            pricing: Pricing::default(),
        };
        assert_eq!(config.slice_keys(), SliceKeys::default());

        config.key_prefix = Some("merch".to_string());
        assert_eq!(config.slice_keys(), SliceKeys::with_prefix("merch"));
    }
}
