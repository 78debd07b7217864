//! # Folio CLI
//!
//! Command-line front end for the bookstore ledger.
//!
//! ## Usage
//! ```bash
//! folio add --title "Dune" --author "Frank Herbert" --genre "Sci-Fi" --price 9.99 --quantity 10
//! folio sell "Dune" 3
//! folio update "Dune" price 8.99
//! folio report
//! folio --json analyze
//! folio breakdown month
//! ```
//!
//! ## Run Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Args::parse()                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliConfig::from_env(--data-dir)  ← flag beats FOLIO_DATA_DIR           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CsvStore::open → Ledger::open    ← creates missing tables              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commands::dispatch(command)      ← text or JSON to stdout              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ExitCode 0 / 1 / 2               ← errors to stderr                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use folio_core::{GroupBy, Ledger};
use folio_store::CsvStore;

use crate::commands::Context;
use crate::config::CliConfig;
use crate::error::CliError;

/// Bookstore inventory and sales ledger.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding inventory.csv and sales.csv
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new title to the inventory
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        genre: String,
        /// Unit price, e.g. 12.99
        #[arg(long, allow_hyphen_values = true)]
        price: String,
        /// Copies in stock
        #[arg(long, allow_hyphen_values = true)]
        quantity: String,
    },
    /// Change one field of a title (author, genre, price, quantity)
    Update {
        title: String,
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Record a sale
    Sell {
        title: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Remove a title from the inventory
    Remove { title: String },
    /// Show the inventory table
    List,
    /// Inventory and sales summary
    Report,
    /// Sales statistics
    Analyze,
    /// Units and revenue grouped by genre, author or month
    Breakdown {
        #[arg(value_enum)]
        by: Grouping,
    },
}

/// Grouping key accepted by `breakdown`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Genre,
    Author,
    Month,
}

impl From<Grouping> for GroupBy {
    fn from(grouping: Grouping) -> Self {
        match grouping {
            Grouping::Genre => GroupBy::Genre,
            Grouping::Author => GroupBy::Author,
            Grouping::Month => GroupBy::Month,
        }
    }
}

/// Main entry point for the `folio` binary.
pub fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut stdout = io::stdout().lock();
    match run(&args, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if args.json {
                if let Ok(json) = serde_json::to_string_pretty(&err) {
                    let _ = writeln!(stdout, "{json}");
                }
            }
            eprintln!("error: {err}");
            ExitCode::from(err.exit_status())
        }
    }
}

/// Opens the ledger named by `args` and runs its command.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), CliError> {
    let config = CliConfig::from_env(args.data_dir.clone())?;
    debug!(
        inventory = %config.store.inventory_path.display(),
        sales = %config.store.sales_path.display(),
        "Resolved table paths"
    );

    let store = CsvStore::open(config.store.clone())?;
    let mut ledger = Ledger::open(store)?;

    let ctx = Context {
        config: &config,
        json: args.json,
    };
    commands::dispatch(&args.command, &mut ledger, &ctx, out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=folio_store=debug` - Show table reads and writes only
/// - Default: WARN, with INFO for folio crates (`--verbose` raises to DEBUG)
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,folio=debug"
    } else {
        "warn,folio=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
