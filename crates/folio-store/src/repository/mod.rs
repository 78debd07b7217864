//! # Repository Module
//!
//! Row layouts of the two CSV tables and the shared read/write plumbing.
//!
//! ## Row Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    File Row ⇄ Domain Record                             │
//! │                                                                         │
//! │  inventory.csv                                                          │
//! │  Title,Author,Genre,Price,Quantity                                      │
//! │  Dune,Herbert,Sci-Fi,300.00,10     ⇄  BookRow  ⇄  Book                  │
//! │                                                                         │
//! │  sales.csv                                                              │
//! │  Date,Title,Quantity Sold,Total Revenue                                 │
//! │  2026-10-18T09:30:00Z,Dune,3,900.00 ⇄ SaleRow  ⇄  SaleRecord            │
//! │                                                                         │
//! │  Rows hold raw strings. Conversion into a domain record runs the same   │
//! │  validation as the ledger, so a hand-edited file cannot smuggle in a    │
//! │  negative stock.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Tables
//!
//! - [`inventory`] - Book rows
//! - [`sales`] - Sale rows

pub mod inventory;
pub mod sales;

use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

/// Reads every row of a table, checking the header first.
///
/// Returns `Ok(None)` when the file does not exist. A zero-byte file reads
/// as an empty table.
pub(crate) fn read_rows<T: DeserializeOwned>(
    path: &Path,
    headers: &[&str],
) -> StoreResult<Option<Vec<T>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::io(path, err)),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let found: Vec<String> = reader
        .headers()
        .map_err(|e| StoreError::csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    if found.is_empty() {
        return Ok(Some(Vec::new()));
    }
    if headers.iter().any(|h| !found.iter().any(|f| f == h)) {
        return Err(StoreError::Header {
            path: path.to_path_buf(),
            expected: headers.iter().map(|h| h.to_string()).collect(),
            found,
        });
    }

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| StoreError::csv(path, e))?;
    Ok(Some(rows))
}

/// Writes the header row then every row to `writer`.
///
/// The header is written explicitly so an empty table still carries it.
pub(crate) fn write_rows<W: Write, T: Serialize>(
    writer: W,
    path: &Path,
    headers: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> StoreResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer
        .write_record(headers)
        .map_err(|e| StoreError::csv(path, e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| StoreError::csv(path, e))?;
    }
    writer.flush().map_err(|e| StoreError::io(path, e))
}
