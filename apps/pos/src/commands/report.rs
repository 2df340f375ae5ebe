//! # Report Commands
//!
//! Daily summary over the receipt log. The aggregation itself lives in
//! `minipos_core::report`; this command just feeds it the persisted
//! receipts.

use chrono::{NaiveDate, Utc};

use minipos_core::report::{daily_summary, DailySummary};

use crate::error::ApiError;
use crate::state::AppState;

/// Daily summary for an arbitrary calendar day.
pub async fn daily_report(state: &AppState, day: NaiveDate) -> Result<DailySummary, ApiError> {
    Ok(state
        .store
        .with_store(|s| daily_summary(s.receipts(), day)))
}

/// Daily summary for today (the default report screen).
pub async fn today_report(state: &AppState) -> Result<DailySummary, ApiError> {
    daily_report(state, Utc::now().date_naive()).await
}

// =============================================================================
// Unit Tests
// =============================================================================
