//! # Sales Table
//!
//! `Date,Title,Quantity Sold,Total Revenue`, one sale per row, oldest first.
//!
//! ## Date Column
//! Written as RFC 3339 in UTC with whole seconds. Older tables hold a plain
//! calendar date, or a date and time without zone; both are read as UTC.
//!
//! | Stored value               | Read as                    |
//! |----------------------------|----------------------------|
//! | `2026-10-18T09:30:00Z`     | 2026-10-18 09:30:00 UTC    |
//! | `2026-10-18T11:30:00+02:00`| 2026-10-18 09:30:00 UTC    |
//! | `2026-10-18 09:30:00`      | 2026-10-18 09:30:00 UTC    |
//! | `2026-10-18`               | 2026-10-18 00:00:00 UTC    |

use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use folio_core::validation::parse_quantity;
use folio_core::{Money, SaleRecord, ValidationError, ValidationResult};

use crate::error::{StoreError, StoreResult};

/// Header row of the sales table.
pub const SALES_HEADERS: [&str; 4] = ["Date", "Title", "Quantity Sold", "Total Revenue"];

/// One sales row as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Quantity Sold")]
    pub quantity_sold: String,
    #[serde(rename = "Total Revenue")]
    pub total_revenue: String,
}

impl SaleRow {
    pub fn from_sale(sale: &SaleRecord) -> Self {
        SaleRow {
            date: sale.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true),
            title: sale.title().to_string(),
            quantity_sold: sale.quantity_sold().to_string(),
            total_revenue: sale.revenue().to_decimal_string(),
        }
    }

    /// Converts the row into a validated [`SaleRecord`].
    pub fn into_sale(self) -> ValidationResult<SaleRecord> {
        let timestamp = parse_timestamp(&self.date)?;
        let quantity = parse_quantity(&self.quantity_sold)?;
        let revenue = Money::parse_rounded(&self.total_revenue)?;
        SaleRecord::new(&self.title, quantity, revenue, timestamp)
    }
}

/// Parses the Date column in any of the accepted layouts.
pub fn parse_timestamp(value: &str) -> ValidationResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: format!("'{value}' is not a date"),
    })
}

/// Converts loaded rows, naming the first bad row.
pub(crate) fn decode(path: &Path, rows: Vec<SaleRow>) -> StoreResult<Vec<SaleRecord>> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            row.into_sale()
                .map_err(|e| StoreError::invalid_row(path, idx + 1, e))
        })
        .collect()
}
