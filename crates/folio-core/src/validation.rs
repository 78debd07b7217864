//! # Validation Module
//!
//! Field-level validation for books and sales.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                    │
//! │  └── Argument presence, grouping keys                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Empty strings, length limits                                       │
//! │  └── Price/stock within bounds, positive sale quantity                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger                                                        │
//! │  └── Unique titles, stock sufficiency                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::validation::{validate_text, validate_sale_quantity};
//!
//! assert_eq!(validate_text("title", "  Dune ").unwrap(), "Dune");
//! assert!(validate_sale_quantity(0).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::{MAX_PRICE_CENTS, MAX_STOCK, MAX_TEXT_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field (title, author, genre).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_TEXT_LEN`] characters
///
/// ## Returns
/// The trimmed value.
pub fn validate_text(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::OutOfRange {
            field: format!("{field} length"),
            min: 1,
            max: MAX_TEXT_LEN as i64,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a book price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Must not exceed [`MAX_PRICE_CENTS`]
/// - Zero is allowed (giveaways, review copies)
///
/// ## Example
/// ```rust
/// use folio_core::money::Money;
/// use folio_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(1299)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// assert!(validate_price(Money::from_cents(100_000_000_000)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Must not exceed [`MAX_STOCK`]
pub fn validate_stock(quantity: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates the quantity of a sale.
///
/// ## User Workflow
/// ```text
/// sell "Dune" 3
///      │
///      ▼
/// validate_sale_quantity(3) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → Error: "quantity must be positive"
///      ├── qty > MAX_STOCK? → Error: out of range
///      │
///      └── OK → stock check in the ledger
/// ```
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_STOCK {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Largest revenue one sale can carry: a full stock at the highest price.
pub const MAX_REVENUE_CENTS: i64 = MAX_PRICE_CENTS * MAX_STOCK;

/// Validates a revenue amount read back from storage.
pub fn validate_revenue(revenue: Money) -> ValidationResult<()> {
    if revenue.is_negative() || revenue.cents() > MAX_REVENUE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "revenue".to_string(),
            min: 0,
            max: MAX_REVENUE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Parsers
// =============================================================================

/// Parses a whole-number quantity from user input.
pub fn parse_quantity(value: &str) -> ValidationResult<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::invalid_format("quantity", "must be a whole number"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text("title", "Dune").unwrap(), "Dune");
        assert_eq!(validate_text("author", "  Frank Herbert\t").unwrap(), "Frank Herbert");

        assert_eq!(
            validate_text("genre", "   "),
            Err(ValidationError::required("genre"))
        );
        assert!(validate_text("title", "").is_err());
        assert!(validate_text("title", &"A".repeat(MAX_TEXT_LEN + 1)).is_err());
        assert!(validate_text("title", &"A".repeat(MAX_TEXT_LEN)).is_ok());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(1099)).is_ok());
        assert!(validate_price(Money::from_cents(-100)).is_err());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert_eq!(
            validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_CENTS,
            })
        );
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(25).is_ok());
        assert!(validate_stock(-1).is_err());
        assert!(validate_stock(MAX_STOCK).is_ok());
        assert!(validate_stock(MAX_STOCK + 1).is_err());
    }

    #[test]
    fn test_validate_sale_quantity() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-4).is_err());
        assert!(validate_sale_quantity(MAX_STOCK).is_ok());
        assert!(matches!(
            validate_sale_quantity(MAX_STOCK + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_revenue() {
        assert!(validate_revenue(Money::zero()).is_ok());
        assert!(validate_revenue(Money::from_cents(MAX_REVENUE_CENTS)).is_ok());
        assert!(validate_revenue(Money::from_cents(MAX_REVENUE_CENTS + 1)).is_err());
        assert!(validate_revenue(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
        assert_eq!(parse_quantity("-3").unwrap(), -3);
        assert!(parse_quantity("3.5").is_err());
        assert!(parse_quantity("ten").is_err());
    }
}
