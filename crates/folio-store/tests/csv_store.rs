//! Integration tests for `CsvStore` against real files in a temp directory.

use std::fs;

use chrono::{TimeZone, Utc};
use folio_core::{BookUpdate, Ledger, LedgerError, Money, TableStore};
use folio_store::{CsvStore, StoreConfig, StoreError};
use tempfile::TempDir;

fn open(dir: &TempDir) -> Ledger<CsvStore> {
    let store = CsvStore::open(StoreConfig::new(dir.path())).unwrap();
    Ledger::open(store).unwrap()
}

#[test]
fn test_open_initializes_header_only_tables() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("shop").join("data");

    let store = CsvStore::open(StoreConfig::new(&nested)).unwrap();

    let inventory = fs::read_to_string(store.inventory_path()).unwrap();
    let sales = fs::read_to_string(store.sales_path()).unwrap();
    assert_eq!(inventory.trim_end(), "Title,Author,Genre,Price,Quantity");
    assert_eq!(sales.trim_end(), "Date,Title,Quantity Sold,Total Revenue");

    let ledger = Ledger::open(store).unwrap();
    assert!(ledger.books().is_empty());
    assert!(ledger.sales().is_empty());
}

#[test]
fn test_tables_reload_to_equal_values() {
    let dir = TempDir::new().unwrap();
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();

    let (books, sales) = {
        let mut ledger = open(&dir);
        ledger
            .add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10)
            .unwrap();
        ledger
            .add_book("Jane Eyre", "Charlotte Brontë", "Romance, Gothic", Money::from_cents(1150), 14)
            .unwrap();
        ledger.record_sale_at("Dune", 3, at).unwrap();
        ledger
            .update_book("Jane Eyre", BookUpdate::Price(Money::from_cents(999)))
            .unwrap();
        (ledger.books().to_vec(), ledger.sales().to_vec())
    };

    let reopened = open(&dir);
    assert_eq!(reopened.books(), books.as_slice());
    assert_eq!(reopened.sales(), sales.as_slice());
    assert_eq!(reopened.book("Dune").unwrap().quantity(), 7);
    assert_eq!(reopened.sales_report().total_revenue, Money::from_major(900));
}

#[test]
fn test_written_rows_match_file_format() {
    let dir = TempDir::new().unwrap();
    let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();

    let mut ledger = open(&dir);
    ledger
        .add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10)
        .unwrap();
    ledger.record_sale_at("Dune", 3, at).unwrap();

    let inventory = fs::read_to_string(dir.path().join("inventory.csv")).unwrap();
    let sales = fs::read_to_string(dir.path().join("sales.csv")).unwrap();
    assert_eq!(
        inventory.lines().collect::<Vec<_>>(),
        vec!["Title,Author,Genre,Price,Quantity", "Dune,Herbert,Sci-Fi,300.00,7"]
    );
    assert_eq!(
        sales.lines().collect::<Vec<_>>(),
        vec![
            "Date,Title,Quantity Sold,Total Revenue",
            "2026-10-18T09:30:00Z,Dune,3,900.00"
        ]
    );
}

#[test]
fn test_reads_tables_in_legacy_layout() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("inventory.csv"),
        "Title,Author,Genre,Price,Quantity\n\
         The Great Gatsby,F. Scott Fitzgerald,Fiction,12.99,25\n\
         1984,George Orwell,Dystopian,13.99,20\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("sales.csv"),
        "Date,Title,Quantity Sold,Total Revenue\n\
         2026-07-02,1984,3,41.97\n\
         2026-07-05,The Great Gatsby,2,25.979999999999997\n",
    )
    .unwrap();

    let ledger = open(&dir);
    assert_eq!(ledger.books().len(), 2);
    assert_eq!(ledger.book("1984").unwrap().price(), Money::from_cents(1399));

    let sales = ledger.sales();
    assert_eq!(sales[0].timestamp(), Utc.with_ymd_and_hms(2026, 7, 2, 0, 0, 0).unwrap());
    assert_eq!(sales[1].revenue(), Money::from_cents(2598));
}

#[test]
fn test_bad_row_is_reported_with_position() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("inventory.csv"),
        "Title,Author,Genre,Price,Quantity\nDune,Herbert,Sci-Fi,300.00,10\nEmma,Austen,Romance,cheap,4\n",
    )
    .unwrap();

    let mut store = CsvStore::open(StoreConfig::new(dir.path())).unwrap();
    let err = store.load_inventory().unwrap_err();
    assert!(matches!(err, StoreError::InvalidRow { row: 2, .. }));
}

#[test]
fn test_wrong_header_is_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("sales.csv"), "When,What,How Many\n").unwrap();

    let mut store = CsvStore::open(StoreConfig::new(dir.path())).unwrap();
    assert!(matches!(
        store.load_sales(),
        Err(StoreError::Header { .. })
    ));
    assert!(matches!(
        Ledger::open(store),
        Err(LedgerError::Persistence(_))
    ));
}

#[test]
fn test_duplicate_titles_in_file_are_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("inventory.csv"),
        "Title,Author,Genre,Price,Quantity\nDune,Herbert,Sci-Fi,3.00,1\nDune,Herbert,Sci-Fi,4.00,2\n",
    )
    .unwrap();

    let store = CsvStore::open(StoreConfig::new(dir.path())).unwrap();
    assert!(matches!(
        Ledger::open(store),
        Err(LedgerError::DuplicateKey { .. })
    ));
}

#[test]
fn test_failed_flush_keeps_memory_and_files_unchanged() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let store = CsvStore::open(StoreConfig::new(&data)).unwrap();
    let mut ledger = Ledger::open(store).unwrap();
    ledger
        .add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10)
        .unwrap();

    let before_books = ledger.books().to_vec();
    fs::remove_dir_all(&data).unwrap();

    let err = ledger.record_sale("Dune", 3).unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(_)));
    assert_eq!(ledger.books(), before_books.as_slice());
    assert!(ledger.sales().is_empty());

    // saves never recreate the directory
    assert!(!data.exists());
}

#[test]
fn test_missing_table_is_recreated_on_load() {
    let dir = TempDir::new().unwrap();
    let mut store = CsvStore::open(StoreConfig::new(dir.path())).unwrap();
    fs::remove_file(store.sales_path()).unwrap();

    assert!(store.load_sales().unwrap().is_empty());
    assert!(store.sales_path().exists());
}

#[test]
fn test_separate_file_overrides() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig::new(dir.path())
        .inventory_file(dir.path().join("books").join("stock.csv"))
        .sales_file(dir.path().join("till.csv"));

    let mut ledger = Ledger::open(CsvStore::open(config).unwrap()).unwrap();
    ledger
        .add_book("Dune", "Herbert", "Sci-Fi", Money::from_major(300), 10)
        .unwrap();

    assert!(dir.path().join("books").join("stock.csv").exists());
    assert!(dir.path().join("till.csv").exists());
    assert!(!dir.path().join("inventory.csv").exists());
}
