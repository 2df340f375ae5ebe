//! # History Commands
//!
//! Receipt history: listing, filtering, detail, cancellation, export.
//! Receipts are never deleted; cancellation flips status and records a
//! reason, and cancelled receipts stay visible.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use minipos_core::types::{PaymentMethod, Receipt, ReceiptStatus};

use crate::error::ApiError;
use crate::export::render_receipt_html;
use crate::state::AppState;

/// Optional filters for the history list. All criteria AND together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryFilter {
    /// Calendar day (receipt's local UTC date).
    pub date: Option<NaiveDate>,
    pub payment_type: Option<PaymentMethod>,
    pub status: Option<ReceiptStatus>,
    /// Substring match on the receipt number.
    pub number: Option<String>,
}

impl HistoryFilter {
    fn matches(&self, receipt: &Receipt) -> bool {
        if let Some(date) = self.date {
            if receipt.created_at.date_naive() != date {
                return false;
            }
        }
        if let Some(payment) = self.payment_type {
            if receipt.payment_type != payment {
                return false;
            }
        }
        if let Some(status) = self.status {
            if receipt.status != status {
                return false;
            }
        }
        if let Some(number) = &self.number {
            if !receipt.number.contains(number.trim()) {
                return false;
            }
        }
        true
    }
}

/// Lists receipts, most recent first, with optional filters.
pub async fn list_receipts(
    state: &AppState,
    filter: HistoryFilter,
) -> Result<Vec<Receipt>, ApiError> {
    Ok(state.store.with_store(|s| {
        s.receipts()
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect()
    }))
}

/// One receipt by id.
pub async fn receipt_detail(state: &AppState, id: &str) -> Result<Receipt, ApiError> {
    Ok(state.store.with_store(|s| s.receipt(id).map(Clone::clone))?)
}

/// Cancels a receipt with a mandatory reason.
pub async fn cancel_receipt(
    state: &AppState,
    id: &str,
    reason: &str,
) -> Result<Receipt, ApiError> {
    let receipt = state
        .store
        .with_store_mut(|s| s.cancel_receipt(id, reason))?;
    info!(number = %receipt.number, "receipt cancelled from history");
    Ok(receipt)
}

/// Renders a receipt as a standalone HTML document for download.
pub async fn export_receipt(state: &AppState, id: &str) -> Result<String, ApiError> {
    let receipt = state.store.with_store(|s| s.receipt(id).map(Clone::clone))?;
    Ok(render_receipt_html(&receipt, &state.config.store_name))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::catalog::{add_product, AddProductRequest};
    use crate::commands::checkout::{confirm_qr_payment, pay_cash};
    use crate::state::{AppConfig, Cashier};
    use minipos_core::Money;
    use minipos_store::{DomainStore, MemoryKv, StorePolicy};

    async fn state_with_two_sales() -> AppState {
        let config = AppConfig {
            print_endpoint: "http://127.0.0.1:1/print".to_string(),
            ..AppConfig::default()
        };
        let store = DomainStore::open(Box::new(MemoryKv::new()), StorePolicy::default()).unwrap();
        let state = AppState::new(config, store);
        state.session.sign_in(Cashier {
            id: "u1".to_string(),
            name: "Aisha".to_string(),
            point_id: "1".to_string(),
        });

        let product = add_product(
            &state,
            AddProductRequest {
                name: "Cola".to_string(),
                price: Money::from_minor(10000),
                category: "Drinks".to_string(),
                is_fast_product: false,
                image_url: String::new(),
                barcode: None,
            },
        )
        .await
        .unwrap();

        add_to_cart(&state, &product.id).await.unwrap();
        pay_cash(&state).await.unwrap();

        add_to_cart(&state, &product.id).await.unwrap();
        confirm_qr_payment(&state).await.unwrap();

        state
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let state = state_with_two_sales().await;
        let receipts = list_receipts(&state, HistoryFilter::default()).await.unwrap();
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0].number, "1002");
        assert_eq!(receipts[1].number, "1001");
    }

    #[tokio::test]
    async fn test_filter_by_payment_type() {
        let state = state_with_two_sales().await;
        let filter = HistoryFilter {
            payment_type: Some(PaymentMethod::Qr),
            ..HistoryFilter::default()
        };
        let receipts = list_receipts(&state, filter).await.unwrap();
        assert_eq!(receipts.len(), 1);
        assert_eq!(receipts[0].number, "1002");
    }

    #[tokio::test]
    async fn test_filter_by_number_substring() {
        let state = state_with_two_sales().await;
        let filter = HistoryFilter {
            number: Some("02".to_string()),
            ..HistoryFilter::default()
        };
        let receipts = list_receipts(&state, filter).await.unwrap();
        assert_eq!(receipts.len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_then_filter_by_status() {
        let state = state_with_two_sales().await;
        let receipts = list_receipts(&state, HistoryFilter::default()).await.unwrap();
        cancel_receipt(&state, &receipts[0].id, "test return").await.unwrap();

        let cancelled = list_receipts(
            &state,
            HistoryFilter {
                status: Some(ReceiptStatus::Cancelled),
                ..HistoryFilter::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].cancel_reason.as_deref(), Some("test return"));

        // Still two receipts total, nothing deleted
        let all = list_receipts(&state, HistoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_export_contains_number() {
        let state = state_with_two_sales().await;
        let receipts = list_receipts(&state, HistoryFilter::default()).await.unwrap();
        let html = export_receipt(&state, &receipts[1].id).await.unwrap();
        assert!(html.contains("Чек #1001"));
    }
}
