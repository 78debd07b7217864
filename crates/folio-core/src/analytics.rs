//! # Analytics Engine
//!
//! Descriptive statistics over the sales table.
//!
//! Two columns are analysed: revenue (in currency units) and quantity sold.
//! Each gets mean, median, sample standard deviation, min and max.
//! Standard deviation uses Bessel's correction (divisor n − 1).
//!
//! An empty sales table is a normal state, so "no data" is a `None`, not an
//! error.

use serde::Serialize;
use ts_rs::TS;

use crate::types::SaleRecord;

/// Number of sales at each end of the table compared by the growth rate.
pub const GROWTH_WINDOW: usize = 5;

/// Five-number summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ColumnStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` with fewer than two observations.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Summarizes `values`; `None` when empty.
    pub fn from_values(values: &[f64]) -> Option<ColumnStats> {
        if values.is_empty() {
            return None;
        }

        let n = values.len();
        let mean = mean(values);

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };

        let std_dev = (n > 1).then(|| {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (n - 1) as f64).sqrt()
        });

        Some(ColumnStats {
            mean,
            median,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Result of [`analyze_sales`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SalesAnalysis {
    pub transactions: usize,
    /// Revenue per sale, in currency units.
    pub revenue: Option<ColumnStats>,
    /// Copies per sale.
    pub quantity: Option<ColumnStats>,
    /// Percent change from the mean revenue of the earliest sales to that of
    /// the latest ones.
    pub growth_rate_pct: Option<f64>,
}

impl SalesAnalysis {
    /// True when there were no sales to analyse.
    pub fn is_empty(&self) -> bool {
        self.transactions == 0
    }
}

/// Computes revenue and quantity statistics over `sales`.
///
/// ## Example
/// ```rust
/// use folio_core::analytics::analyze_sales;
///
/// let analysis = analyze_sales(&[]);
/// assert!(analysis.revenue.is_none());
/// assert!(analysis.quantity.is_none());
/// ```
pub fn analyze_sales(sales: &[SaleRecord]) -> SalesAnalysis {
    let revenues: Vec<f64> = sales.iter().map(|s| s.revenue().to_major_units()).collect();
    let quantities: Vec<f64> = sales.iter().map(|s| s.quantity_sold() as f64).collect();

    SalesAnalysis {
        transactions: sales.len(),
        revenue: ColumnStats::from_values(&revenues),
        quantity: ColumnStats::from_values(&quantities),
        growth_rate_pct: growth_rate(&revenues),
    }
}

/// Mean of the last [`GROWTH_WINDOW`] values against the mean of the first
/// ones, as a percentage. Windows overlap when there are fewer than
/// `2 * GROWTH_WINDOW` values.
fn growth_rate(revenues: &[f64]) -> Option<f64> {
    if revenues.len() < 2 {
        return None;
    }

    let window = GROWTH_WINDOW.min(revenues.len());
    let earliest = mean(&revenues[..window]);
    let latest = mean(&revenues[revenues.len() - window..]);

    (earliest != 0.0).then(|| (latest - earliest) / earliest * 100.0)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// =============================================================================
// Unit Tests
// =============================================================================
