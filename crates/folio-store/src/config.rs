//! # Store Configuration
//!
//! Where the two table files live.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::from_env()                                                │
//! │                                                                         │
//! │  FOLIO_DATA_DIR set?                                                    │
//! │       │ yes → <dir>/inventory.csv, <dir>/sales.csv                      │
//! │       │ no  → platform data dir                                         │
//! │       │         Linux:   ~/.local/share/bookstore/                      │
//! │       │         macOS:   ~/Library/Application Support/com.folio.bookstore/
//! │       │         Windows: %APPDATA%\folio\bookstore\data\                │
//! │       ▼                                                                 │
//! │  FOLIO_INVENTORY_FILE / FOLIO_SALES_FILE override each file on its own  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{StoreError, StoreResult};

/// Default inventory file name inside the data directory.
pub const INVENTORY_FILE: &str = "inventory.csv";

/// Default sales file name inside the data directory.
pub const SALES_FILE: &str = "sales.csv";

/// Table file locations.
///
/// ## Example
/// ```rust
/// use folio_store::StoreConfig;
///
/// let config = StoreConfig::new("/srv/shop").sales_file("/srv/archive/2026.csv");
/// assert!(config.inventory_path.ends_with("inventory.csv"));
/// assert!(config.sales_path.ends_with("2026.csv"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the inventory table.
    pub inventory_path: PathBuf,

    /// Path of the sales table.
    pub sales_path: PathBuf,
}

impl StoreConfig {
    /// Uses `inventory.csv` and `sales.csv` inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        StoreConfig {
            inventory_path: dir.join(INVENTORY_FILE),
            sales_path: dir.join(SALES_FILE),
        }
    }

    /// Sets the inventory table path.
    pub fn inventory_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.inventory_path = path.into();
        self
    }

    /// Sets the sales table path.
    pub fn sales_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sales_path = path.into();
        self
    }

    /// Builds the configuration from `FOLIO_*` environment variables.
    ///
    /// ## Errors
    /// `NoDataDir` when `FOLIO_DATA_DIR` is unset and the platform has no
    /// home directory to derive a data directory from.
    pub fn from_env() -> StoreResult<Self> {
        Self::from_vars(|key| std::env::var_os(key))
    }

    /// Same as [`StoreConfig::from_env`], reading variables through `vars`.
    pub fn from_vars(vars: impl Fn(&str) -> Option<OsString>) -> StoreResult<Self> {
        let dir = match vars("FOLIO_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        Ok(Self::new(dir).with_overrides_from(vars))
    }

    /// Applies `FOLIO_INVENTORY_FILE` / `FOLIO_SALES_FILE` on top of `self`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var_os(key))
    }

    /// Applies the per-table overrides found through `vars`.
    pub fn with_overrides_from(mut self, vars: impl Fn(&str) -> Option<OsString>) -> Self {
        if let Some(path) = vars("FOLIO_INVENTORY_FILE") {
            self.inventory_path = PathBuf::from(path);
        }
        if let Some(path) = vars("FOLIO_SALES_FILE") {
            self.sales_path = PathBuf::from(path);
        }
        self
    }
}

/// Platform-specific data directory for Folio.
pub fn default_data_dir() -> StoreResult<PathBuf> {
    ProjectDirs::from("com", "folio", "bookstore")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StoreError::NoDataDir)
}
