//! # CLI Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Folio                                  │
//! │                                                                         │
//! │  folio sell "Dune" 40                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<(), CliError>                                            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage Error? ─── StoreError::Io { .. } ──────────┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Ledger Error? ─── LedgerError::InsufficientStock ─ CliError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: error: Insufficient stock for 'Dune': available 7, ...        │
//! │  exit:   1                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Codes
//! | Code | Meaning                                               |
//! |------|-------------------------------------------------------|
//! | 0    | Success                                               |
//! | 1    | Rejected: invalid input, duplicate, unknown title, stock |
//! | 2    | Storage or configuration failure                      |
//!
//! With `--json` the error is also printed to stdout as
//! `{"code": "NOT_FOUND", "message": "..."}`.

use serde::Serialize;

use folio_core::{LedgerError, ValidationError};
use folio_store::StoreError;

/// Error returned from a command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Title not in the inventory
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Title already in the inventory
    DuplicateKey,

    /// Sale larger than current stock
    InsufficientStock,

    /// Table files could not be read or written
    StorageError,

    /// No usable data directory, or output could not be written
    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_status(self) -> u8 {
        match self {
            ErrorCode::NotFound
            | ErrorCode::ValidationError
            | ErrorCode::DuplicateKey
            | ErrorCode::InsufficientStock => 1,
            ErrorCode::StorageError | ErrorCode::Internal => 2,
        }
    }
}

impl CliError {
    /// Creates a new CLI error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    pub fn exit_status(&self) -> u8 {
        self.code.exit_status()
    }
}

/// Converts ledger errors to CLI errors.
impl From<LedgerError> for CliError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::InvalidInput(_) => ErrorCode::ValidationError,
            LedgerError::DuplicateKey { .. } => ErrorCode::DuplicateKey,
            LedgerError::NotFound(_) => ErrorCode::NotFound,
            LedgerError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            LedgerError::Persistence(source) => {
                tracing::error!(error = %source, "Table flush failed");
                ErrorCode::StorageError
            }
        };
        CliError::new(code, err.to_string())
    }
}

/// Converts store errors to CLI errors.
impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        let code = match err {
            StoreError::NoDataDir => ErrorCode::Internal,
            _ => ErrorCode::StorageError,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::internal(format!("Could not write output: {err}"))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("Could not encode JSON: {err}"))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_errors_map_to_exit_one() {
        let err = CliError::from(LedgerError::not_found("Dune"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.exit_status(), 1);
        assert_eq!(err.to_string(), "Book not found: Dune");

        let err = CliError::from(LedgerError::InsufficientStock {
            title: "Dune".to_string(),
            available: 7,
            requested: 9,
        });
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn test_storage_errors_map_to_exit_two() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CliError::from(LedgerError::persistence(io));
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.exit_status(), 2);

        assert_eq!(CliError::from(StoreError::NoDataDir).exit_status(), 2);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = CliError::new(ErrorCode::DuplicateKey, "Book 'Dune' already exists");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "DUPLICATE_KEY");
        assert_eq!(json["message"], "Book 'Dune' already exists");
    }
}
