//! # folio-store: Persistence Layer for Folio
//!
//! This crate keeps the ledger tables as flat CSV files and implements
//! [`folio_core::TableStore`] over them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Folio Data Flow                                │
//! │                                                                         │
//! │  folio sell "Dune" 3                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ledger::record_sale (folio-core)                                       │
//! │       │ save_ledger(books, sales)                                       │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  folio-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CsvStore    │    │  Repositories │    │ StoreConfig  │  │   │
//! │  │   │  (store.rs)   │    │ (inventory.rs │    │ (config.rs)  │  │   │
//! │  │   │               │    │   sales.rs)   │    │              │  │   │
//! │  │   │ stage+commit  │◄───│ BookRow       │    │ FOLIO_* env  │  │   │
//! │  │   │ open-or-init  │    │ SaleRow       │    │ data dir     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   ~/.local/share/bookstore/{inventory,sales}.csv                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Table locations
//! - [`error`] - Store error types
//! - [`repository`] - Row layouts for each table
//! - [`store`] - The `CsvStore` itself
//!
//! ## Usage
//!
//! ```rust,no_run
//! use folio_core::{Ledger, Money};
//! use folio_store::{CsvStore, StoreConfig};
//!
//! let store = CsvStore::open(StoreConfig::new("./shop-data"))?;
//! let mut ledger = Ledger::open(store)?;
//! ledger.add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::CsvStore;
