//! # Reporting / Aggregation
//!
//! Pure, stateless daily sales aggregation. Nothing here is cached or
//! incrementally maintained - every view recomputes from the full receipt
//! log, which at this scale (a single till's history) is a linear pass over
//! a small in-memory list.
//!
//! ## Aggregation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     daily_summary(receipts, day)                        │
//! │                                                                         │
//! │  receipts ──► filter: status == Paid                                   │
//! │              filter: created_at date (not time!) == day                 │
//! │       │                                                                 │
//! │       ├──► totals: count, Σ total, average (guard ÷0)                  │
//! │       │                                                                 │
//! │       ├──► partition by payment_type ──► cash / qr breakdowns           │
//! │       │                                                                 │
//! │       └──► per-product {count, revenue} over all items                  │
//! │                 │                                                       │
//! │                 └──► stable sort by revenue desc ──► take 5             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PaymentMethod, Receipt};

/// How many entries the top-products list keeps.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

// =============================================================================
// Summary Types
// =============================================================================

/// Revenue and receipt count for one payment method.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    /// Number of paid receipts settled with this method.
    pub count: usize,
    /// Sum of receipt totals settled with this method.
    pub revenue: Money,
}

/// Sales accumulated for one product across the day's receipts.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: String,
    /// Name from the receipt snapshot (survives catalog edits/deletes).
    pub name: String,
    /// Units sold.
    pub count: i64,
    /// `Σ price × qty` over the matching items.
    pub revenue: Money,
}

/// The daily report: everything the report screen shows for one
/// calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// The selected calendar day.
    #[ts(as = "String")]
    pub date: NaiveDate,
    /// Count of paid receipts on that day.
    pub total_receipts: usize,
    /// Sum of their totals.
    pub total_revenue: Money,
    /// `total_revenue / total_receipts`, zero when there are no receipts.
    pub average_check: Money,
    /// Cash receipts breakdown.
    pub cash: PaymentBreakdown,
    /// QR receipts breakdown.
    pub qr: PaymentBreakdown,
    /// Top products by revenue, at most [`TOP_PRODUCTS_LIMIT`] entries,
    /// descending; ties keep first-seen order (stable sort).
    pub top_products: Vec<ProductSales>,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Computes the daily summary for `day` over the full receipt log.
///
/// Only receipts whose `created_at` **date** (time-of-day ignored) matches
/// `day` and whose status is still `Paid` count; cancelled receipts
/// disappear from revenue entirely.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use minipos_core::report::daily_summary;
///
/// let today = Utc::now().date_naive();
/// let summary = daily_summary(&[], today);
/// assert_eq!(summary.total_receipts, 0);
/// assert!(summary.average_check.is_zero()); // ÷0 guarded
/// ```
pub fn daily_summary(receipts: &[Receipt], day: NaiveDate) -> DailySummary {
    let day_receipts: Vec<&Receipt> = receipts
        .iter()
        .filter(|r| r.is_paid() && r.created_at.date_naive() == day)
        .collect();

    let total_receipts = day_receipts.len();
    let total_revenue: Money = day_receipts.iter().map(|r| r.total).sum();

    // Division by zero must be guarded: no receipts → zero average
    let average_check = if total_receipts > 0 {
        Money::from_minor(total_revenue.minor() / total_receipts as i64)
    } else {
        Money::zero()
    };

    let cash = breakdown_for(&day_receipts, PaymentMethod::Cash);
    let qr = breakdown_for(&day_receipts, PaymentMethod::Qr);

    DailySummary {
        date: day,
        total_receipts,
        total_revenue,
        average_check,
        cash,
        qr,
        top_products: top_products(&day_receipts),
    }
}

/// Partitions the day's receipts by payment method.
fn breakdown_for(receipts: &[&Receipt], method: PaymentMethod) -> PaymentBreakdown {
    let matching: Vec<&&Receipt> = receipts
        .iter()
        .filter(|r| r.payment_type == method)
        .collect();

    PaymentBreakdown {
        count: matching.len(),
        revenue: matching.iter().map(|r| r.total).sum(),
    }
}

/// Accumulates per-product sales over all items of the day's receipts and
/// returns the top entries by revenue.
///
/// Accumulation preserves first-seen order, and the sort is stable, so
/// revenue ties resolve to insertion order.
fn top_products(receipts: &[&Receipt]) -> Vec<ProductSales> {
    let mut sales: Vec<ProductSales> = Vec::new();

    for receipt in receipts {
        for item in &receipt.items {
            match sales.iter_mut().find(|s| s.product_id == item.product_id) {
                Some(existing) => {
                    existing.count += item.qty;
                    existing.revenue += item.line_total();
                }
                None => sales.push(ProductSales {
                    product_id: item.product_id.clone(),
                    name: item.product_name.clone(),
                    count: item.qty,
                    revenue: item.line_total(),
                }),
            }
        }
    }

    // Stable sort: equal revenues keep their first-seen order
    sales.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    sales.truncate(TOP_PRODUCTS_LIMIT);
    sales
}

// =============================================================================
// Unit Tests
// =============================================================================
