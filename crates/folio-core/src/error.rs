//! # Error Types
//!
//! Domain-specific error types for folio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  folio-core errors (this file)                                         │
//! │  ├── LedgerError      - Rejected ledger operations                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  folio-store errors (separate crate)                                   │
//! │  └── StoreError       - CSV / file system failures                     │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees, plus an exit code          │
//! │                                                                         │
//! │  Flow: ValidationError → LedgerError ← StoreError                      │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                           CliError                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `LedgerError` is recoverable. A rejected operation leaves the
//! in-memory tables exactly as they were.

use thiserror::Error;

/// Boxed error coming back from a [`TableStore`](crate::store::TableStore).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// =============================================================================
// Ledger Error
// =============================================================================

/// Errors returned by [`Ledger`](crate::ledger::Ledger) operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or out-of-range field value.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// A book with this title is already stocked.
    ///
    /// ## When This Occurs
    /// - `add_book` with a title already in inventory
    /// - Loading an inventory file that lists a title twice
    #[error("Book '{title}' already exists")]
    DuplicateKey { title: String },

    /// No book with this title is stocked.
    #[error("Book not found: {0}")]
    NotFound(String),

    /// Sale quantity exceeds current stock.
    ///
    /// ## User Workflow
    /// ```text
    /// sell "Dune" 5
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { title: "Dune", available: 3, requested: 5 }
    /// ```
    #[error("Insufficient stock for '{title}': available {available}, requested {requested}")]
    InsufficientStock {
        title: String,
        available: i64,
        requested: i64,
    },

    /// The store could not load or save a table.
    ///
    /// In-memory state has been rolled back; the caller decides whether to
    /// retry or abort.
    #[error("Persistence failed: {0}")]
    Persistence(#[source] BoxError),
}

impl LedgerError {
    /// Wraps any store error as [`LedgerError::Persistence`].
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        LedgerError::Persistence(Box::new(err))
    }

    /// Creates a NotFound error for a title.
    pub fn not_found(title: impl Into<String>) -> Self {
        LedgerError::NotFound(title.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building a [`Book`](crate::types::Book) or
/// [`SaleRecord`](crate::types::SaleRecord), or while parsing user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., unparsable price, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::InsufficientStock {
            title: "Dune".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for 'Dune': available 3, requested 5"
        );

        let err = LedgerError::DuplicateKey {
            title: "Dune".to_string(),
        };
        assert_eq!(err.to_string(), "Book 'Dune' already exists");
        assert_eq!(
            LedgerError::not_found("Emma").to_string(),
            "Book not found: Emma"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("title").to_string(), "title is required");

        let err = ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        };
        assert!(err.to_string().starts_with("price must be between 0"));
    }

    #[test]
    fn test_validation_converts_to_ledger_error() {
        let core_err: LedgerError = ValidationError::required("author").into();
        assert!(matches!(core_err, LedgerError::InvalidInput(_)));
    }

    #[test]
    fn test_persistence_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = LedgerError::persistence(io);
        assert_eq!(err.to_string(), "Persistence failed: read-only");
        assert!(std::error::Error::source(&err).is_some());
    }
}
