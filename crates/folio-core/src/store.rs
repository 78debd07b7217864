//! # Table Store
//!
//! The persistence seam between the ledger and durable storage.
//!
//! ```text
//! ┌──────────────┐   load_* / save_*   ┌────────────────────────────────┐
//! │    Ledger    │ ──────────────────► │  TableStore                    │
//! │ (folio-core) │                     │  ├── CsvStore   (folio-store)  │
//! └──────────────┘                     │  └── MemoryStore (this file)   │
//!                                      └────────────────────────────────┘
//! ```
//!
//! Implementations perform open-or-initialize: loading a table that does not
//! exist yet returns an empty table, never an error.

use thiserror::Error;

use crate::types::{Book, SaleRecord};

/// Load/save access to the inventory and sales tables.
pub trait TableStore {
    /// Error raised by this store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Loads the inventory table, initializing it if missing.
    fn load_inventory(&mut self) -> Result<Vec<Book>, Self::Error>;

    /// Loads the sales table, initializing it if missing.
    fn load_sales(&mut self) -> Result<Vec<SaleRecord>, Self::Error>;

    /// Replaces the stored inventory table.
    fn save_inventory(&mut self, books: &[Book]) -> Result<(), Self::Error>;

    /// Replaces the stored sales table.
    fn save_sales(&mut self, sales: &[SaleRecord]) -> Result<(), Self::Error>;

    /// Replaces both tables in one flush.
    ///
    /// The default writes inventory, then sales. Stores that can stage both
    /// writes before committing either should override this.
    fn save_ledger(&mut self, books: &[Book], sales: &[SaleRecord]) -> Result<(), Self::Error> {
        self.save_inventory(books)?;
        self.save_sales(sales)
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Error returned by [`MemoryStore`] when writes are switched off.
#[derive(Debug, Clone, Error)]
#[error("memory store rejected write to {table}")]
pub struct MemoryStoreError {
    pub table: &'static str,
}

/// In-memory [`TableStore`] for tests and dry runs.
///
/// ## Usage
/// ```rust
/// use folio_core::{Ledger, MemoryStore, Money};
///
/// let mut ledger = Ledger::open(MemoryStore::new()).unwrap();
/// ledger.add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10).unwrap();
/// assert_eq!(ledger.store().inventory().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inventory: Vec<Book>,
    sales: Vec<SaleRecord>,
    fail_writes: bool,
    fail_next_sales: bool,
    saves: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store preloaded with tables.
    pub fn with_tables(inventory: Vec<Book>, sales: Vec<SaleRecord>) -> Self {
        MemoryStore {
            inventory,
            sales,
            ..MemoryStore::default()
        }
    }

    /// Makes every following save fail (simulates an unwritable disk).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Makes the next sales save fail while inventory saves still succeed.
    ///
    /// Simulates a flush that dies between the two table writes.
    pub fn fail_next_sales_write(&mut self) {
        self.fail_next_sales = true;
    }

    /// The last saved inventory table.
    pub fn inventory(&self) -> &[Book] {
        &self.inventory
    }

    /// The last saved sales table.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Number of successful table writes.
    pub fn saves(&self) -> usize {
        self.saves
    }

    fn check_writable(&self, table: &'static str) -> Result<(), MemoryStoreError> {
        if self.fail_writes {
            return Err(MemoryStoreError { table });
        }
        Ok(())
    }
}

impl TableStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load_inventory(&mut self) -> Result<Vec<Book>, Self::Error> {
        Ok(self.inventory.clone())
    }

    fn load_sales(&mut self) -> Result<Vec<SaleRecord>, Self::Error> {
        Ok(self.sales.clone())
    }

    fn save_inventory(&mut self, books: &[Book]) -> Result<(), Self::Error> {
        self.check_writable("inventory")?;
        self.inventory = books.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn save_sales(&mut self, sales: &[SaleRecord]) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_next_sales) {
            return Err(MemoryStoreError { table: "sales" });
        }
        self.check_writable("sales")?;
        self.sales = sales.to_vec();
        self.saves += 1;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
