//! # folio-core: Pure Ledger Logic for Folio
//!
//! This crate is the **heart** of Folio. It owns the inventory and sales
//! tables, enforces their invariants, and computes every report. It never
//! touches the file system: persistence goes through the [`TableStore`]
//! trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    folio CLI (apps/cli)                         │   │
//! │  │   add ─ update ─ sell ─ remove ─ list ─ report ─ analyze        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  ledger   │  │  report   │  │ analytics │  │ validation│  │   │
//! │  │   │  Ledger   │  │ Inventory │  │  mean     │  │   rules   │  │   │
//! │  │   │ mutations │  │  Sales    │  │  median   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO ENVIRONMENT • DETERMINISTIC REPORTS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ TableStore                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 folio-store (Persistence Layer)                 │   │
//! │  │            CSV tables, atomic writes, data directory            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Book, SaleRecord and BookUpdate
//! - [`money`] - Money type with integer cents
//! - [`error`] - Ledger and validation errors
//! - [`validation`] - Field rules
//! - [`ledger`] - The mutating operations and their rollback
//! - [`store`] - Persistence trait and an in-memory store
//! - [`report`] - Inventory, sales and breakdown reports
//! - [`analytics`] - Descriptive statistics over sales
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::{Ledger, MemoryStore, Money};
//!
//! let mut ledger = Ledger::open(MemoryStore::new()).unwrap();
//! ledger.add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10).unwrap();
//! ledger.record_sale("Dune", 3).unwrap();
//!
//! let report = ledger.inventory_report();
//! assert_eq!(report.total_stock, 7);
//! assert_eq!(report.total_value, Money::from_major(2100));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use analytics::{analyze_sales, ColumnStats, SalesAnalysis};
pub use error::{LedgerError, LedgerResult, ValidationError, ValidationResult};
pub use ledger::Ledger;
pub use money::Money;
pub use report::{
    inventory_report, sales_breakdown, sales_report, BreakdownRow, GroupBy, InventoryReport,
    SalesReport, TitleSales,
};
pub use store::{MemoryStore, MemoryStoreError, TableStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of every "top N" ranking in the reports.
pub const TOP_N: usize = 5;

/// Maximum length of a title, author or genre, in characters.
///
/// Keeps a stray paste from turning into a multi-kilobyte CSV cell.
pub const MAX_TEXT_LEN: usize = 200;

/// Highest accepted book price, in cents ($1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Highest accepted stock level, and so the largest single sale.
///
/// With [`MAX_PRICE_CENTS`] this bounds one stock value or sale revenue at
/// 10^14 cents, well inside `i64`.
pub const MAX_STOCK: i64 = 1_000_000;
