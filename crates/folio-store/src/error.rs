//! # Store Error Types
//!
//! Error types for table file operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error / tempfile::PersistError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the file path and row number          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LedgerError::Persistence (folio-core) ← Boxed behind the trait        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError ← Printed to the user with an exit code                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Table file errors.
///
/// Every variant carries the path of the file involved, since a data
/// directory holds two tables and the user needs to know which one broke.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File system operation failed.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - Permission denied on a table file
    /// - Disk full
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader or writer failed.
    ///
    /// ## When This Occurs
    /// - Row has a different number of fields than the header
    /// - Invalid UTF-8 in a cell
    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Row parsed as CSV but holds an invalid value.
    ///
    /// ## When This Occurs
    /// - Negative price or quantity
    /// - Unparseable date
    /// - Empty title
    ///
    /// `row` is 1-based and counts data rows only.
    #[error("Invalid row {row} in {}: {reason}", path.display())]
    InvalidRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    /// Header row does not match the table layout.
    #[error("Unexpected header in {}: expected [{}], found [{}]", path.display(), expected.join(","), found.join(","))]
    Header {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Renaming the staged temp file over the table failed.
    #[error("Could not replace {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No data directory configured and no platform default available.
    #[error("No data directory: set FOLIO_DATA_DIR or pass --data-dir")]
    NoDataDir,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        StoreError::Csv {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_row(path: impl Into<PathBuf>, row: usize, reason: impl ToString) -> Self {
        StoreError::InvalidRow {
            path: path.into(),
            row,
            reason: reason.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
