//! # Folio Command-Line Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging to stderr)
//! 3. Resolve the data directory and open the CSV tables
//! 4. Run one command
//! 5. Exit with 0 (ok), 1 (rejected by the ledger) or 2 (storage/config)

fn main() -> std::process::ExitCode {
    // The actual setup is in lib.rs for better testability
    folio_cli::main()
}
