//! # Seed Data Generator
//!
//! Populates a data directory with a demo inventory and sales history.
//!
//! ## Usage
//! ```bash
//! # Seed the default data directory (FOLIO_DATA_DIR or platform dir)
//! cargo run -p folio-store --bin seed
//!
//! # Seed a specific directory with 500 sales
//! cargo run -p folio-store --bin seed -- --dir ./shop-data --sales 500
//! ```
//!
//! ## Generated Data
//! - 15 classic titles across nine genres, $9.99 - $15.99, 12 - 30 copies
//! - N sales (default 150) of the first ten titles, 1 - 5 copies each,
//!   spread over the 90 days before today, oldest first
//!
//! The generator is a fixed arithmetic sequence, so two runs on the same
//! day produce identical files. Sales are history only: stock levels are
//! written as listed, not reduced by the generated sales.

use std::env;
use std::path::PathBuf;

use chrono::{Duration, NaiveTime, Utc};
use folio_core::{Book, Money, SaleRecord, TableStore};
use folio_store::{CsvStore, StoreConfig};

/// (title, author, genre, price in cents, stock)
const BOOKS: &[(&str, &str, &str, i64, i64)] = &[
    ("The Great Gatsby", "F. Scott Fitzgerald", "Fiction", 1299, 25),
    ("To Kill a Mockingbird", "Harper Lee", "Fiction", 1450, 30),
    ("1984", "George Orwell", "Dystopian", 1399, 20),
    ("Pride and Prejudice", "Jane Austen", "Romance", 1199, 15),
    ("The Catcher in the Rye", "J.D. Salinger", "Fiction", 1250, 18),
    ("Lord of the Flies", "William Golding", "Adventure", 1099, 22),
    ("Animal Farm", "George Orwell", "Political Satire", 999, 28),
    ("Brave New World", "Aldous Huxley", "Science Fiction", 1350, 16),
    ("The Hobbit", "J.R.R. Tolkien", "Fantasy", 1599, 12),
    ("Fahrenheit 451", "Ray Bradbury", "Science Fiction", 1275, 20),
    ("Jane Eyre", "Charlotte Brontë", "Romance", 1150, 14),
    ("Wuthering Heights", "Emily Brontë", "Gothic", 1075, 17),
    ("The Picture of Dorian Gray", "Oscar Wilde", "Gothic", 1225, 19),
    ("Dracula", "Bram Stoker", "Horror", 1199, 21),
    ("Frankenstein", "Mary Shelley", "Horror", 1050, 23),
];

/// Only the first ten titles appear in the generated sales.
const SOLD_TITLES: usize = 10;

/// Days of history covered by the generated sales.
const HISTORY_DAYS: i64 = 90;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut dir: Option<PathBuf> = None;
    let mut sales_count: usize = 150;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sales_count = args[i + 1].parse().unwrap_or(150);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Folio Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <DIR>    Data directory (default: FOLIO_DATA_DIR or platform dir)");
                println!("  -s, --sales <N>    Number of sales to generate (default: 150)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = match dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env()?,
    };

    println!("🌱 Folio Seed Data Generator");
    println!("===========================");
    println!("Inventory: {}", config.inventory_path.display());
    println!("Sales:     {}", config.sales_path.display());
    println!();

    let mut store = CsvStore::open(config)?;

    let existing = store.load_inventory()?;
    if !existing.is_empty() {
        println!("⚠ Inventory already has {} titles", existing.len());
        println!("  Skipping seed to avoid overwriting it.");
        println!("  Delete the table files to regenerate.");
        return Ok(());
    }

    let books = sample_books()?;
    let sales = sample_sales(&books, sales_count)?;
    store.save_ledger(&books, &sales)?;

    let revenue: Money = sales.iter().map(SaleRecord::revenue).sum();
    println!("✓ Wrote {} titles", books.len());
    println!("✓ Wrote {} sales totalling {}", sales.len(), revenue);
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn sample_books() -> Result<Vec<Book>, folio_core::ValidationError> {
    BOOKS
        .iter()
        .map(|(title, author, genre, cents, stock)| {
            Book::new(title, author, genre, Money::from_cents(*cents), *stock)
        })
        .collect()
}

/// Generates `count` sales, sorted oldest first.
fn sample_sales(books: &[Book], count: usize) -> Result<Vec<SaleRecord>, folio_core::ValidationError> {
    let start = (Utc::now() - Duration::days(HISTORY_DAYS))
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc();
    let sold = &books[..SOLD_TITLES.min(books.len())];
    if sold.is_empty() {
        return Ok(Vec::new());
    }

    let mut sales = (0..count)
        .map(|seed| {
            let book = &sold[(seed * 7 + seed / 3) % sold.len()];
            let quantity = 1 + (seed * 13 % 5) as i64;
            let day = (seed * 37 + 11) as i64 % HISTORY_DAYS;
            let minute = (seed * 53 % 540) as i64;
            let at = start + Duration::days(day) + Duration::hours(9) + Duration::minutes(minute);

            SaleRecord::new(book.title(), quantity, book.price() * quantity, at)
        })
        .collect::<Result<Vec<_>, _>>()?;

    sales.sort_by_key(SaleRecord::timestamp);
    Ok(sales)
}
