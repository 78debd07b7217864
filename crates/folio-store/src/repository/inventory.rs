//! # Inventory Table
//!
//! `Title,Author,Genre,Price,Quantity`, one book per row.

use std::path::Path;

use serde::{Deserialize, Serialize};

use folio_core::validation::parse_quantity;
use folio_core::{Book, Money, ValidationResult};

use crate::error::{StoreError, StoreResult};

/// Header row of the inventory table.
pub const INVENTORY_HEADERS: [&str; 5] = ["Title", "Author", "Genre", "Price", "Quantity"];

/// One inventory row as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Genre")]
    pub genre: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
}

impl BookRow {
    pub fn from_book(book: &Book) -> Self {
        BookRow {
            title: book.title().to_string(),
            author: book.author().to_string(),
            genre: book.genre().to_string(),
            price: book.price().to_decimal_string(),
            quantity: book.quantity().to_string(),
        }
    }

    /// Converts the row into a validated [`Book`].
    ///
    /// Prices written by spreadsheet tools as floats (`12.990000000000002`)
    /// are rounded to the nearest cent.
    pub fn into_book(self) -> ValidationResult<Book> {
        let price = Money::parse_rounded(&self.price)?;
        let quantity = parse_quantity(&self.quantity)?;
        Book::new(&self.title, &self.author, &self.genre, price, quantity)
    }
}

/// Converts loaded rows, naming the first bad row.
pub(crate) fn decode(path: &Path, rows: Vec<BookRow>) -> StoreResult<Vec<Book>> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            row.into_book()
                .map_err(|e| StoreError::invalid_row(path, idx + 1, e))
        })
        .collect()
}
