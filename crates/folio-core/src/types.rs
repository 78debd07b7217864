//! # Domain Types
//!
//! The two record types of the ledger and the typed field update.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │   SaleRecord    │   │   BookUpdate    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  title (key)    │◄──│  title          │   │  Author(String) │       │
//! │  │  author         │   │  quantity_sold  │   │  Genre(String)  │       │
//! │  │  genre          │   │  revenue        │   │  Price(Money)   │       │
//! │  │  price          │   │  timestamp      │   │  Quantity(i64)  │       │
//! │  │  quantity       │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fields are private: a `Book` or `SaleRecord` only exists after its
//! constructor validated every field, so a stored record never holds a
//! negative stock, a negative price or an empty title.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::validation::{
    parse_quantity, validate_price, validate_revenue, validate_sale_quantity, validate_stock,
    validate_text,
};

// =============================================================================
// Book
// =============================================================================

/// A title stocked by the shop.
///
/// Identity is the title: exact, case-sensitive match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Book {
    title: String,
    author: String,
    genre: String,
    price: Money,
    quantity: i64,
}

impl Book {
    /// Builds a validated book record. Text fields are trimmed.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::{Book, Money};
    ///
    /// let dune = Book::new("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10).unwrap();
    /// assert_eq!(dune.quantity(), 10);
    ///
    /// assert!(Book::new("", "Herbert", "Sci-Fi", Money::zero(), 1).is_err());
    /// assert!(Book::new("Dune", "Herbert", "Sci-Fi", Money::from_cents(-1), 1).is_err());
    /// ```
    pub fn new(
        title: &str,
        author: &str,
        genre: &str,
        price: Money,
        quantity: i64,
    ) -> ValidationResult<Book> {
        let title = validate_text("title", title)?;
        let author = validate_text("author", author)?;
        let genre = validate_text("genre", genre)?;
        validate_price(price)?;
        validate_stock(quantity)?;

        Ok(Book {
            title,
            author,
            genre,
            price,
            quantity,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Current stock.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Price × stock.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Checks if `quantity` copies can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.quantity
    }

    /// Applies a single-field update after validating the new value.
    ///
    /// On error the book is left untouched.
    pub(crate) fn apply(&mut self, update: &BookUpdate) -> ValidationResult<()> {
        match update {
            BookUpdate::Author(author) => self.author = validate_text("author", author)?,
            BookUpdate::Genre(genre) => self.genre = validate_text("genre", genre)?,
            BookUpdate::Price(price) => {
                validate_price(*price)?;
                self.price = *price;
            }
            BookUpdate::Quantity(quantity) => {
                validate_stock(*quantity)?;
                self.quantity = *quantity;
            }
        }
        Ok(())
    }

    /// Removes sold copies. Callers check [`Book::can_sell`] first.
    pub(crate) fn take_stock(&mut self, quantity: i64) {
        debug_assert!(self.can_sell(quantity));
        self.quantity -= quantity;
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// One completed sale. Never mutated once recorded.
///
/// Uses the snapshot pattern: `revenue` freezes the price at the time of
/// sale, so later price changes or removal of the book do not rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    title: String,
    quantity_sold: i64,
    revenue: Money,
    #[ts(as = "String")]
    timestamp: DateTime<Utc>,
}

impl SaleRecord {
    /// Builds a validated sale record.
    pub fn new(
        title: &str,
        quantity_sold: i64,
        revenue: Money,
        timestamp: DateTime<Utc>,
    ) -> ValidationResult<SaleRecord> {
        let title = validate_text("title", title)?;
        validate_sale_quantity(quantity_sold)?;
        validate_revenue(revenue)?;

        Ok(SaleRecord {
            title,
            quantity_sold,
            revenue,
            timestamp,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn quantity_sold(&self) -> i64 {
        self.quantity_sold
    }

    pub fn revenue(&self) -> Money {
        self.revenue
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

// =============================================================================
// Book Update
// =============================================================================

/// A change to one field of a stocked book.
///
/// The title is the key and cannot be changed in place; remove and re-add
/// the book instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookUpdate {
    Author(String),
    Genre(String),
    Price(Money),
    /// New stock level (restock or correction).
    Quantity(i64),
}

impl BookUpdate {
    /// Field names accepted by [`BookUpdate::parse`].
    pub const FIELDS: [&'static str; 4] = ["author", "genre", "price", "quantity"];

    /// Parses a field name and raw value, as typed at the command line.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::{BookUpdate, Money};
    ///
    /// assert_eq!(
    ///     BookUpdate::parse("Price", "12.50").unwrap(),
    ///     BookUpdate::Price(Money::from_cents(1250))
    /// );
    /// assert!(BookUpdate::parse("title", "Emma").is_err());
    /// assert!(BookUpdate::parse("quantity", "many").is_err());
    /// ```
    pub fn parse(field: &str, value: &str) -> ValidationResult<BookUpdate> {
        match field.trim().to_ascii_lowercase().as_str() {
            "author" => Ok(BookUpdate::Author(value.to_string())),
            "genre" => Ok(BookUpdate::Genre(value.to_string())),
            "price" => Ok(BookUpdate::Price(value.parse()?)),
            "quantity" | "stock" => Ok(BookUpdate::Quantity(parse_quantity(value)?)),
            _ => Err(ValidationError::NotAllowed {
                field: "field".to_string(),
                allowed: Self::FIELDS.iter().map(|f| f.to_string()).collect(),
            }),
        }
    }

    /// The field this update touches.
    pub fn field(&self) -> &'static str {
        match self {
            BookUpdate::Author(_) => "author",
            BookUpdate::Genre(_) => "genre",
            BookUpdate::Price(_) => "price",
            BookUpdate::Quantity(_) => "quantity",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dune() -> Book {
        Book::new("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10).unwrap()
    }

    #[test]
    fn test_book_new_trims_and_validates() {
        let book = Book::new("  Emma ", " Austen", "Romance ", Money::from_cents(1199), 0).unwrap();
        assert_eq!(book.title(), "Emma");
        assert_eq!(book.author(), "Austen");
        assert_eq!(book.genre(), "Romance");
        assert_eq!(book.quantity(), 0);

        assert!(Book::new("Emma", "", "Romance", Money::zero(), 1).is_err());
        assert!(Book::new("Emma", "Austen", " ", Money::zero(), 1).is_err());
        assert!(Book::new("Emma", "Austen", "Romance", Money::zero(), -1).is_err());
    }

    #[test]
    fn test_stock_value_and_can_sell() {
        let book = dune();
        assert_eq!(book.stock_value(), Money::from_major(3000));
        assert!(book.can_sell(10));
        assert!(!book.can_sell(11));
    }

    #[test]
    fn test_apply_rejects_without_mutating() {
        let mut book = dune();
        let before = book.clone();

        assert!(book.apply(&BookUpdate::Quantity(-5)).is_err());
        assert!(book.apply(&BookUpdate::Price(Money::from_cents(-1))).is_err());
        assert!(book.apply(&BookUpdate::Author("   ".to_string())).is_err());
        assert_eq!(book, before);

        book.apply(&BookUpdate::Genre(" Classic ".to_string())).unwrap();
        assert_eq!(book.genre(), "Classic");
    }

    #[test]
    fn test_sale_record_new() {
        let at = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
        let sale = SaleRecord::new("Dune", 3, Money::from_major(900), at).unwrap();
        assert_eq!(sale.title(), "Dune");
        assert_eq!(sale.quantity_sold(), 3);
        assert_eq!(sale.revenue(), Money::from_major(900));
        assert_eq!(sale.timestamp(), at);

        assert!(SaleRecord::new("Dune", 0, Money::zero(), at).is_err());
        assert!(SaleRecord::new("Dune", 1, Money::from_cents(-1), at).is_err());
        assert!(SaleRecord::new("", 1, Money::zero(), at).is_err());
    }

    #[test]
    fn test_book_update_parse() {
        assert_eq!(
            BookUpdate::parse(" AUTHOR ", "Le Guin").unwrap(),
            BookUpdate::Author("Le Guin".to_string())
        );
        assert_eq!(BookUpdate::parse("stock", "15").unwrap(), BookUpdate::Quantity(15));
        assert_eq!(BookUpdate::parse("quantity", "-2").unwrap().field(), "quantity");

        assert!(matches!(
            BookUpdate::parse("title", "Emma"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(BookUpdate::parse("price", "cheap").is_err());
    }

    #[test]
    fn test_book_serializes_for_reports() {
        let json = serde_json::to_value(dune()).unwrap();
        assert_eq!(json["title"], "Dune");
        assert_eq!(json["price"], 30000);
    }
}
