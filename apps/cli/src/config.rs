//! # CLI Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`)
//! 2. Environment variables (`FOLIO_*`)
//! 3. Defaults (platform data directory, `$`)

use std::ffi::OsString;
use std::path::PathBuf;

use folio_core::Money;
use folio_store::{StoreConfig, StoreResult};

/// Resolved configuration for one CLI run.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Table file locations
    pub store: StoreConfig,

    /// Currency symbol for display
    pub currency_symbol: String,
}

impl CliConfig {
    /// Creates a config for tables in `store` with default display settings.
    pub fn new(store: StoreConfig) -> Self {
        CliConfig {
            store,
            currency_symbol: "$".to_string(),
        }
    }

    /// Resolves the configuration from flags and environment variables.
    ///
    /// ## Environment Variables
    /// - `FOLIO_DATA_DIR`: Data directory when `--data-dir` is not given
    /// - `FOLIO_INVENTORY_FILE` / `FOLIO_SALES_FILE`: Per-table paths
    /// - `FOLIO_CURRENCY_SYMBOL`: Display symbol (default `$`)
    pub fn from_env(data_dir: Option<PathBuf>) -> StoreResult<Self> {
        Self::from_vars(data_dir, |key| std::env::var_os(key))
    }

    /// Same as [`CliConfig::from_env`], reading variables through `vars`.
    pub fn from_vars(
        data_dir: Option<PathBuf>,
        vars: impl Fn(&str) -> Option<OsString>,
    ) -> StoreResult<Self> {
        let store = match data_dir {
            Some(dir) => StoreConfig::new(dir).with_overrides_from(&vars),
            None => StoreConfig::from_vars(&vars)?,
        };

        let mut config = CliConfig::new(store);
        if let Some(symbol) = vars("FOLIO_CURRENCY_SYMBOL").and_then(|s| s.into_string().ok()) {
            config.currency_symbol = symbol;
        }
        Ok(config)
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use folio_cli::config::CliConfig;
    /// use folio_core::Money;
    /// use folio_store::StoreConfig;
    ///
    /// let config = CliConfig::new(StoreConfig::new("."));
    /// assert_eq!(config.format_currency(Money::from_cents(123456)), "$1234.56");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let digits = amount.to_decimal_string();
        format!(
            "{}{}{}",
            sign,
            self.currency_symbol,
            digits.trim_start_matches('-')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(symbol: &str) -> CliConfig {
        CliConfig {
            store: StoreConfig::new("."),
            currency_symbol: symbol.to_string(),
        }
    }

    #[test]
    fn test_format_currency() {
        let dollars = config("$");
        assert_eq!(dollars.format_currency(Money::from_cents(1299)), "$12.99");
        assert_eq!(dollars.format_currency(Money::zero()), "$0.00");
        assert_eq!(dollars.format_currency(Money::from_cents(-5)), "-$0.05");

        let pounds = config("£");
        assert_eq!(pounds.format_currency(Money::from_major(900)), "£900.00");
    }

    #[test]
    fn test_data_dir_flag_sets_store_paths() {
        let config = CliConfig::from_vars(Some(PathBuf::from("/srv/shop")), |_| None).unwrap();
        assert_eq!(
            config.store.inventory_path,
            PathBuf::from("/srv/shop/inventory.csv")
        );
        assert_eq!(config.store.sales_path, PathBuf::from("/srv/shop/sales.csv"));
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn test_data_dir_flag_beats_env_dir() {
        let vars = |key: &str| match key {
            "FOLIO_DATA_DIR" => Some(OsString::from("/var/lib/folio")),
            "FOLIO_INVENTORY_FILE" => Some(OsString::from("/mnt/books.csv")),
            "FOLIO_CURRENCY_SYMBOL" => Some(OsString::from("€")),
            _ => None,
        };
        let config = CliConfig::from_vars(Some(PathBuf::from("/srv/shop")), vars).unwrap();
        assert_eq!(config.store.inventory_path, PathBuf::from("/mnt/books.csv"));
        assert_eq!(config.store.sales_path, PathBuf::from("/srv/shop/sales.csv"));
        assert_eq!(config.currency_symbol, "€");
    }
}
