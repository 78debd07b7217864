//! # Ledger Core
//!
//! Owns the inventory and sales tables and keeps them consistent.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       record_sale("Dune", 3)                            │
//! │                                                                         │
//! │  1. LOOKUP      title in inventory?          no  → NotFound             │
//! │  2. VALIDATE    0 < quantity <= MAX_STOCK?   no  → InvalidInput         │
//! │  3. CHECK       quantity <= stock?           no  → InsufficientStock    │
//! │  4. APPLY       stock -= 3, push SaleRecord  (in memory)                │
//! │  5. FLUSH       store.save_ledger(...)                                  │
//! │                     │                                                   │
//! │                     ├── Ok  → return SaleRecord                         │
//! │                     └── Err → undo step 4, re-save old tables,          │
//! │                               return Persistence                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejected operation leaves both tables exactly as they were.
//! Only `record_sale` touches both tables; the other mutations flush the
//! inventory table alone.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::analytics::{self, SalesAnalysis};
use crate::error::{LedgerError, LedgerResult, ValidationError};
use crate::money::Money;
use crate::report::{self, BreakdownRow, GroupBy, InventoryReport, SalesReport};
use crate::store::TableStore;
use crate::types::{Book, BookUpdate, SaleRecord};
use crate::validation::{validate_sale_quantity, MAX_REVENUE_CENTS};

/// The inventory and sales tables, bound to the store they persist to.
///
/// ## Usage
/// ```rust
/// use folio_core::{Ledger, MemoryStore, Money};
///
/// let mut ledger = Ledger::open(MemoryStore::new()).unwrap();
/// ledger.add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10).unwrap();
///
/// let sale = ledger.record_sale("Dune", 3).unwrap();
/// assert_eq!(sale.revenue(), Money::from_major(900));
/// assert_eq!(ledger.book("Dune").unwrap().quantity(), 7);
/// assert_eq!(ledger.sales_report().total_revenue, Money::from_major(900));
/// ```
#[derive(Debug)]
pub struct Ledger<S: TableStore> {
    store: S,
    inventory: Vec<Book>,
    sales: Vec<SaleRecord>,
}

impl<S: TableStore> Ledger<S> {
    /// Loads both tables from `store`.
    ///
    /// ## Errors
    /// - `Persistence` if either table cannot be loaded
    /// - `DuplicateKey` if the stored inventory lists a title twice
    pub fn open(mut store: S) -> LedgerResult<Self> {
        let inventory = store.load_inventory().map_err(LedgerError::persistence)?;
        let sales = store.load_sales().map_err(LedgerError::persistence)?;

        let mut seen = HashSet::new();
        if let Some(dup) = inventory.iter().find(|b| !seen.insert(b.title())) {
            return Err(LedgerError::DuplicateKey {
                title: dup.title().to_string(),
            });
        }

        info!(
            books = inventory.len(),
            sales = sales.len(),
            "Ledger opened"
        );

        Ok(Ledger {
            store,
            inventory,
            sales,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Inventory in table order.
    pub fn books(&self) -> &[Book] {
        &self.inventory
    }

    /// Sales in the order they were recorded.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Looks up a book by exact title.
    pub fn book(&self, title: &str) -> Option<&Book> {
        self.position(title).map(|idx| &self.inventory[idx])
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Gives the store back, dropping the in-memory tables.
    pub fn into_store(self) -> S {
        self.store
    }

    fn position(&self, title: &str) -> Option<usize> {
        let title = title.trim();
        self.inventory.iter().position(|b| b.title() == title)
    }

    fn require(&self, title: &str) -> LedgerResult<usize> {
        self.position(title)
            .ok_or_else(|| LedgerError::not_found(title.trim()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a new title to the inventory.
    ///
    /// ## Errors
    /// - `InvalidInput` for empty text, or a price or quantity out of range
    /// - `DuplicateKey` if the title is already stocked
    /// - `Persistence` if the inventory cannot be saved
    pub fn add_book(
        &mut self,
        title: &str,
        author: &str,
        genre: &str,
        price: Money,
        quantity: i64,
    ) -> LedgerResult<Book> {
        let book = Book::new(title, author, genre, price, quantity)?;
        debug!(title = %book.title(), "Adding book");

        if self.position(book.title()).is_some() {
            return Err(LedgerError::DuplicateKey {
                title: book.title().to_string(),
            });
        }

        let snapshot = self.inventory.clone();
        self.inventory.push(book.clone());
        self.flush_inventory(snapshot)?;

        info!(title = %book.title(), quantity = book.quantity(), "Book added");
        Ok(book)
    }

    /// Changes one field of a stocked book.
    ///
    /// ## Errors
    /// - `NotFound` if the title is not stocked
    /// - `InvalidInput` for an empty string or negative price/quantity
    /// - `Persistence` if the inventory cannot be saved
    pub fn update_book(&mut self, title: &str, update: BookUpdate) -> LedgerResult<Book> {
        let idx = self.require(title)?;
        debug!(title = %title.trim(), field = update.field(), "Updating book");

        let mut updated = self.inventory[idx].clone();
        updated.apply(&update)?;

        let snapshot = self.inventory.clone();
        self.inventory[idx] = updated.clone();
        self.flush_inventory(snapshot)?;

        info!(title = %updated.title(), field = update.field(), "Book updated");
        Ok(updated)
    }

    /// Removes a title from the inventory. Past sales are kept.
    ///
    /// ## Errors
    /// - `NotFound` if the title is not stocked
    /// - `Persistence` if the inventory cannot be saved
    pub fn remove_book(&mut self, title: &str) -> LedgerResult<Book> {
        let idx = self.require(title)?;

        let snapshot = self.inventory.clone();
        let removed = self.inventory.remove(idx);
        self.flush_inventory(snapshot)?;

        info!(title = %removed.title(), "Book removed");
        Ok(removed)
    }

    /// Sells copies of a title, stamped with the current time.
    ///
    /// See [`Ledger::record_sale_at`].
    pub fn record_sale(&mut self, title: &str, quantity: i64) -> LedgerResult<SaleRecord> {
        self.record_sale_at(title, quantity, Utc::now())
    }

    /// Sells copies of a title at an explicit time.
    ///
    /// Decrements stock, appends a sale with revenue = price × quantity and
    /// flushes both tables together.
    ///
    /// ## Errors
    /// - `NotFound` if the title is not stocked
    /// - `InvalidInput` if `quantity` is not positive, exceeds
    ///   [`MAX_STOCK`](crate::MAX_STOCK), or the revenue would overflow
    /// - `InsufficientStock` if `quantity` exceeds current stock
    /// - `Persistence` if the flush fails; memory is rolled back first
    pub fn record_sale_at(
        &mut self,
        title: &str,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> LedgerResult<SaleRecord> {
        let idx = self.require(title)?;
        validate_sale_quantity(quantity)?;

        let book = &self.inventory[idx];
        if !book.can_sell(quantity) {
            return Err(LedgerError::InsufficientStock {
                title: book.title().to_string(),
                available: book.quantity(),
                requested: quantity,
            });
        }

        let revenue = book.price().checked_multiply_quantity(quantity).ok_or_else(|| {
            ValidationError::OutOfRange {
                field: "revenue".to_string(),
                min: 0,
                max: MAX_REVENUE_CENTS,
            }
        })?;
        let sale = SaleRecord::new(book.title(), quantity, revenue, timestamp)?;
        let previous = book.clone();

        self.inventory[idx].take_stock(quantity);
        self.sales.push(sale.clone());

        if let Err(err) = self.store.save_ledger(&self.inventory, &self.sales) {
            self.inventory[idx] = previous;
            self.sales.pop();
            warn!(title = %sale.title(), error = %err, "Sale flush failed, rolled back");

            if let Err(restore) = self.store.save_ledger(&self.inventory, &self.sales) {
                warn!(error = %restore, "Could not restore tables after failed sale");
            }
            return Err(LedgerError::persistence(err));
        }

        info!(
            title = %sale.title(),
            quantity,
            revenue = %sale.revenue(),
            "Sale recorded"
        );
        Ok(sale)
    }

    fn flush_inventory(&mut self, snapshot: Vec<Book>) -> LedgerResult<()> {
        if let Err(err) = self.store.save_inventory(&self.inventory) {
            warn!(error = %err, "Inventory save failed, rolled back");
            self.inventory = snapshot;
            return Err(LedgerError::persistence(err));
        }
        Ok(())
    }

    // =========================================================================
    // Reports
    // =========================================================================

    pub fn inventory_report(&self) -> InventoryReport {
        report::inventory_report(&self.inventory)
    }

    pub fn sales_report(&self) -> SalesReport {
        report::sales_report(&self.sales)
    }

    pub fn sales_breakdown(&self, group_by: GroupBy) -> Vec<BreakdownRow> {
        report::sales_breakdown(&self.sales, &self.inventory, group_by)
    }

    pub fn analyze_sales(&self) -> SalesAnalysis {
        analytics::analyze_sales(&self.sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::{MAX_PRICE_CENTS, MAX_STOCK};
    use chrono::TimeZone;

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::open(MemoryStore::new()).unwrap()
    }

    fn with_dune() -> Ledger<MemoryStore> {
        let mut ledger = ledger();
        ledger
            .add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10)
            .unwrap();
        ledger
    }

    fn tables(ledger: &Ledger<MemoryStore>) -> (Vec<Book>, Vec<SaleRecord>) {
        (ledger.books().to_vec(), ledger.sales().to_vec())
    }

    #[test]
    fn test_dune_example() {
        let mut ledger = with_dune();
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();

        let sale = ledger.record_sale_at("Dune", 3, at).unwrap();

        assert_eq!(ledger.book("Dune").unwrap().quantity(), 7);
        assert_eq!(ledger.sales().len(), 1);
        assert_eq!(sale.title(), "Dune");
        assert_eq!(sale.quantity_sold(), 3);
        assert_eq!(sale.revenue(), Money::from_major(900));
        assert_eq!(sale.timestamp(), at);
        assert_eq!(ledger.sales_report().total_revenue, Money::from_major(900));

        // both tables flushed
        assert_eq!(ledger.store().inventory()[0].quantity(), 7);
        assert_eq!(ledger.store().sales(), ledger.sales());
    }

    #[test]
    fn test_record_sale_uses_current_time() {
        let mut ledger = with_dune();
        let before = Utc::now();
        let sale = ledger.record_sale("Dune", 1).unwrap();
        assert!(sale.timestamp() >= before);
    }

    #[test]
    fn test_sale_decrements_exactly() {
        let mut ledger = with_dune();
        for (qty, left) in [(1, 9), (4, 5), (5, 0)] {
            let sale = ledger.record_sale("Dune", qty).unwrap();
            assert_eq!(sale.revenue(), Money::from_major(300) * qty);
            assert_eq!(ledger.book("Dune").unwrap().quantity(), left);
        }
        assert_eq!(ledger.sales().len(), 3);
    }

    #[test]
    fn test_insufficient_stock_leaves_tables_unchanged() {
        let mut ledger = with_dune();
        ledger.record_sale("Dune", 2).unwrap();
        let before = tables(&ledger);
        let saves = ledger.store().saves();

        let err = ledger.record_sale("Dune", 9).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientStock {
                available: 8,
                requested: 9,
                ..
            }
        ));
        assert_eq!(tables(&ledger), before);
        assert_eq!(ledger.store().saves(), saves);
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let mut ledger = with_dune();
        let before = tables(&ledger);

        let err = ledger.record_sale("Unknown Title", 1).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(ref t) if t == "Unknown Title"));
        assert_eq!(tables(&ledger), before);
    }

    #[test]
    fn test_title_match_is_case_sensitive() {
        let mut ledger = with_dune();
        assert!(matches!(
            ledger.record_sale("dune", 1),
            Err(LedgerError::NotFound(_))
        ));
        // a differently-cased title is a different book
        ledger
            .add_book("DUNE", "Herbert", "Sci-Fi", Money::from_major(10), 1)
            .unwrap();
        assert_eq!(ledger.books().len(), 2);
    }

    #[test]
    fn test_non_positive_sale_quantity_rejected() {
        let mut ledger = with_dune();
        let before = tables(&ledger);
        for qty in [0, -3] {
            assert!(matches!(
                ledger.record_sale("Dune", qty),
                Err(LedgerError::InvalidInput(_))
            ));
        }
        assert_eq!(tables(&ledger), before);
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let mut ledger = with_dune();
        let err = ledger
            .add_book(" Dune ", "Someone", "Other", Money::zero(), 1)
            .unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateKey { ref title } if title == "Dune"));
        assert_eq!(ledger.books().len(), 1);
    }

    #[test]
    fn test_add_invalid_rejected() {
        let mut ledger = ledger();
        assert!(matches!(
            ledger.add_book("Dune", "Herbert", "Sci-Fi", Money::from_cents(-1), 1),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            ledger.add_book("Dune", "Herbert", "Sci-Fi", Money::zero(), -1),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(ledger.books().is_empty());
        assert_eq!(ledger.store().saves(), 0);
    }

    #[test]
    fn test_price_and_stock_bounds() {
        let mut ledger = ledger();
        let too_dear: Money = "100000000000".parse().unwrap();
        assert!(matches!(
            ledger.add_book("Big", "A", "G", too_dear, 1),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            ledger.add_book("Big", "A", "G", Money::from_major(1), MAX_STOCK + 1),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(ledger.books().is_empty());
    }

    #[test]
    fn test_largest_book_reports_and_sells_exactly() {
        let mut ledger = ledger();
        let price = Money::from_cents(MAX_PRICE_CENTS);
        ledger.add_book("Big", "A", "G", price, MAX_STOCK).unwrap();
        ledger.add_book("Bigger", "A", "G", price, MAX_STOCK).unwrap();

        let report = ledger.inventory_report();
        assert_eq!(report.total_value.cents(), 2 * MAX_REVENUE_CENTS);
        assert_eq!(report.total_stock, 2 * MAX_STOCK);

        let sale = ledger.record_sale("Big", MAX_STOCK).unwrap();
        assert_eq!(sale.revenue().cents(), MAX_REVENUE_CENTS);
        assert_eq!(ledger.book("Big").unwrap().quantity(), 0);

        assert!(matches!(
            ledger.record_sale("Bigger", MAX_STOCK + 1),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let mut ledger = with_dune();
        let before = ledger.books().to_vec();

        ledger
            .add_book("Emma", "Austen", "Romance", Money::from_cents(1199), 4)
            .unwrap();
        let removed = ledger.remove_book("Emma").unwrap();

        assert_eq!(removed.title(), "Emma");
        assert_eq!(ledger.books(), before.as_slice());
        assert_eq!(ledger.store().inventory(), before.as_slice());
    }

    #[test]
    fn test_remove_keeps_sales_history() {
        let mut ledger = with_dune();
        ledger.record_sale("Dune", 2).unwrap();
        ledger.remove_book("Dune").unwrap();

        assert!(ledger.book("Dune").is_none());
        assert_eq!(ledger.sales().len(), 1);
        assert!(matches!(
            ledger.remove_book("Dune"),
            Err(LedgerError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_fields() {
        let mut ledger = with_dune();

        let book = ledger
            .update_book("Dune", BookUpdate::Price(Money::from_major(250)))
            .unwrap();
        assert_eq!(book.price(), Money::from_major(250));

        ledger.update_book("Dune", BookUpdate::Quantity(40)).unwrap();
        ledger
            .update_book("Dune", BookUpdate::Author("Frank Herbert".to_string()))
            .unwrap();
        let book = ledger
            .update_book("Dune", BookUpdate::Genre("Classic".to_string()))
            .unwrap();

        assert_eq!(book.quantity(), 40);
        assert_eq!(book.author(), "Frank Herbert");
        assert_eq!(book.genre(), "Classic");
        assert_eq!(ledger.store().inventory()[0], book);
    }

    #[test]
    fn test_update_rejections() {
        let mut ledger = with_dune();
        let before = tables(&ledger);

        assert!(matches!(
            ledger.update_book("Emma", BookUpdate::Quantity(1)),
            Err(LedgerError::NotFound(_))
        ));
        assert!(matches!(
            ledger.update_book("Dune", BookUpdate::Quantity(-1)),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(matches!(
            ledger.update_book("Dune", BookUpdate::Genre(String::new())),
            Err(LedgerError::InvalidInput(_))
        ));
        assert_eq!(tables(&ledger), before);
    }

    #[test]
    fn test_restock_allows_selling_past_original_stock() {
        let mut ledger = with_dune();
        ledger.record_sale("Dune", 10).unwrap();
        assert!(ledger.record_sale("Dune", 1).is_err());

        ledger.update_book("Dune", BookUpdate::Quantity(5)).unwrap();
        ledger.record_sale("Dune", 5).unwrap();

        let sold: i64 = ledger.sales().iter().map(SaleRecord::quantity_sold).sum();
        assert_eq!(sold, 15);
    }

    #[test]
    fn test_failed_sale_flush_rolls_back() {
        let mut ledger = with_dune();
        let before = tables(&ledger);
        ledger.store_mut().set_fail_writes(true);

        let err = ledger.record_sale("Dune", 3).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(tables(&ledger), before);

        // the store still holds the pre-sale tables
        ledger.store_mut().set_fail_writes(false);
        assert_eq!(ledger.store().inventory()[0].quantity(), 10);
        assert!(ledger.store().sales().is_empty());
    }

    #[test]
    fn test_sales_write_failure_restores_stored_inventory() {
        let mut ledger = with_dune();
        ledger.record_sale("Dune", 2).unwrap();
        let before = tables(&ledger);
        ledger.store_mut().fail_next_sales_write();

        let err = ledger.record_sale("Dune", 3).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert_eq!(tables(&ledger), before);

        // the inventory write had gone through; the restore put it back
        let store = ledger.into_store();
        assert_eq!(store.inventory()[0].quantity(), 8);
        assert_eq!(store.sales(), before.1.as_slice());
    }

    #[test]
    fn test_failed_inventory_flush_rolls_back() {
        let mut ledger = with_dune();
        let before = tables(&ledger);
        ledger.store_mut().set_fail_writes(true);

        assert!(ledger
            .add_book("Emma", "Austen", "Romance", Money::zero(), 1)
            .is_err());
        assert!(ledger.update_book("Dune", BookUpdate::Quantity(1)).is_err());
        assert!(ledger.remove_book("Dune").is_err());
        assert_eq!(tables(&ledger), before);
    }

    #[test]
    fn test_open_loads_existing_tables() {
        let dune = Book::new("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 7).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let sale = SaleRecord::new("Dune", 3, Money::from_major(900), at).unwrap();

        let ledger = Ledger::open(MemoryStore::with_tables(vec![dune], vec![sale])).unwrap();
        assert_eq!(ledger.books().len(), 1);
        assert_eq!(ledger.sales().len(), 1);
    }

    #[test]
    fn test_open_rejects_duplicate_titles() {
        let dune = Book::new("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 7).unwrap();
        let store = MemoryStore::with_tables(vec![dune.clone(), dune], vec![]);
        assert!(matches!(
            Ledger::open(store),
            Err(LedgerError::DuplicateKey { .. })
        ));
    }

    #[test]
    fn test_reports_on_empty_ledger() {
        let ledger = ledger();
        let inventory = ledger.inventory_report();
        assert_eq!(inventory.total_stock, 0);
        assert!(inventory.top_by_price.is_empty());
        assert!(ledger.analyze_sales().revenue.is_none());
        assert!(ledger.sales_breakdown(GroupBy::Genre).is_empty());
    }
}
