//! # CSV Table Store
//!
//! [`TableStore`] backed by two CSV files.
//!
//! ## Save Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     save_ledger(books, sales)                           │
//! │                                                                         │
//! │  1. STAGE    inventory rows → .tmpXXXX  (same directory as target)      │
//! │  2. STAGE    sales rows     → .tmpYYYY                                  │
//! │                  │                                                      │
//! │                  ├── any error → temp files dropped, targets untouched  │
//! │                  ▼                                                      │
//! │  3. COMMIT   rename .tmpXXXX → inventory.csv                            │
//! │  4. COMMIT   rename .tmpYYYY → sales.csv                                │
//! │                                                                         │
//! │  A rename within one directory replaces the target in one step, so a    │
//! │  reader sees either the old table or the new one, never a partial one.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Saves never create directories. If the data directory disappears while
//! the ledger is open, the save fails and the ledger rolls back.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use folio_core::{Book, SaleRecord, TableStore};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::repository::inventory::{self, BookRow, INVENTORY_HEADERS};
use crate::repository::sales::{self, SaleRow, SALES_HEADERS};
use crate::repository::{read_rows, write_rows};

/// Ledger tables kept as `inventory.csv` and `sales.csv`.
///
/// ## Usage
/// ```rust,no_run
/// use folio_core::Ledger;
/// use folio_store::{CsvStore, StoreConfig};
///
/// let store = CsvStore::open(StoreConfig::new("./shop-data"))?;
/// let ledger = Ledger::open(store)?;
/// println!("{} titles", ledger.books().len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct CsvStore {
    config: StoreConfig,
}

impl CsvStore {
    /// Opens the tables, creating header-only files (and their directories)
    /// for any that are missing.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        initialize(&config.inventory_path, &INVENTORY_HEADERS)?;
        initialize(&config.sales_path, &SALES_HEADERS)?;
        Ok(CsvStore { config })
    }

    /// Opens the store at the location given by `FOLIO_*` variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::open(StoreConfig::from_env()?)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn inventory_path(&self) -> &Path {
        &self.config.inventory_path
    }

    pub fn sales_path(&self) -> &Path {
        &self.config.sales_path
    }
}

impl TableStore for CsvStore {
    type Error = StoreError;

    fn load_inventory(&mut self) -> StoreResult<Vec<Book>> {
        let path = &self.config.inventory_path;
        let Some(rows) = read_rows::<BookRow>(path, &INVENTORY_HEADERS)? else {
            initialize(path, &INVENTORY_HEADERS)?;
            return Ok(Vec::new());
        };
        let books = inventory::decode(path, rows)?;
        debug!(path = %path.display(), rows = books.len(), "Loaded inventory");
        Ok(books)
    }

    fn load_sales(&mut self) -> StoreResult<Vec<SaleRecord>> {
        let path = &self.config.sales_path;
        let Some(rows) = read_rows::<SaleRow>(path, &SALES_HEADERS)? else {
            initialize(path, &SALES_HEADERS)?;
            return Ok(Vec::new());
        };
        let sales = sales::decode(path, rows)?;
        debug!(path = %path.display(), rows = sales.len(), "Loaded sales");
        Ok(sales)
    }

    fn save_inventory(&mut self, books: &[Book]) -> StoreResult<()> {
        let staged = stage_inventory(&self.config.inventory_path, books)?;
        commit(staged, &self.config.inventory_path)
    }

    fn save_sales(&mut self, sales: &[SaleRecord]) -> StoreResult<()> {
        let staged = stage_sales(&self.config.sales_path, sales)?;
        commit(staged, &self.config.sales_path)
    }

    fn save_ledger(&mut self, books: &[Book], sales: &[SaleRecord]) -> StoreResult<()> {
        let inventory_tmp = stage_inventory(&self.config.inventory_path, books)?;
        let sales_tmp = stage_sales(&self.config.sales_path, sales)?;

        commit(inventory_tmp, &self.config.inventory_path)?;
        commit(sales_tmp, &self.config.sales_path)
    }
}

// =============================================================================
// File Helpers
// =============================================================================

/// Creates a header-only table at `path` unless one exists.
fn initialize(path: &Path, headers: &[&str]) -> StoreResult<()> {
    if path.exists() {
        return Ok(());
    }

    let dir = parent_dir(path);
    fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

    let staged = stage::<BookRow>(path, headers, Vec::new())?;
    commit(staged, path)?;

    info!(path = %path.display(), "Initialized empty table");
    Ok(())
}

fn stage_inventory(path: &Path, books: &[Book]) -> StoreResult<NamedTempFile> {
    stage(path, &INVENTORY_HEADERS, books.iter().map(BookRow::from_book))
}

fn stage_sales(path: &Path, sales: &[SaleRecord]) -> StoreResult<NamedTempFile> {
    stage(path, &SALES_HEADERS, sales.iter().map(SaleRow::from_sale))
}

/// Writes a full table into a temp file beside `path`.
fn stage<T: Serialize>(
    path: &Path,
    headers: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> StoreResult<NamedTempFile> {
    let dir = parent_dir(path);
    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;

    write_rows(tmp.as_file_mut(), path, headers, rows)?;
    tmp.as_file_mut()
        .flush()
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| StoreError::io(tmp.path(), e))?;

    Ok(tmp)
}

/// Renames a staged temp file over `path`.
fn commit(staged: NamedTempFile, path: &Path) -> StoreResult<()> {
    staged.persist(path).map_err(|e| StoreError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    debug!(path = %path.display(), "Table saved");
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
