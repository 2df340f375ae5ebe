//! # Debt Commands
//!
//! The debt book: clients buying on credit and paying the balance down
//! later. The ledger itself is append-only; balance and status are derived
//! at read time.

use serde::Serialize;
use tracing::info;

use minipos_core::types::{Client, DebtEntry, DebtStatus, PaymentMethod};
use minipos_core::Money;

use crate::error::ApiError;
use crate::state::AppState;

/// A client's row in the debt book.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtView {
    pub client: Client,
    pub balance: Money,
    pub status: DebtStatus,
    /// Full entry history, oldest first.
    pub entries: Vec<DebtEntry>,
}

/// All registered clients (the debt book's index).
pub async fn list_clients(state: &AppState) -> Result<Vec<Client>, ApiError> {
    Ok(state.store.with_store(|s| s.clients().to_vec()))
}

/// One client's ledger. A client who never took credit shows a zero
/// balance and an empty history.
pub async fn client_debt(state: &AppState, client_id: &str) -> Result<DebtView, ApiError> {
    let view = state.store.with_store(|s| {
        let client = s.client(client_id).map(Clone::clone)?;
        let (entries, status) = match s.debt_for_client(client_id) {
            Some(debt) => (debt.entries.clone(), debt.status()),
            None => (Vec::new(), DebtStatus::Closed),
        };
        Ok::<_, minipos_store::StoreError>(DebtView {
            client,
            balance: s.debt_balance(client_id),
            status,
            entries,
        })
    })?;
    Ok(view)
}

/// Records goods taken on credit.
pub async fn add_debt(
    state: &AppState,
    client_id: &str,
    amount: Money,
    comment: Option<String>,
) -> Result<DebtView, ApiError> {
    state
        .store
        .with_store_mut(|s| s.add_debt(client_id, amount, comment))?;
    info!(client_id, amount = %amount, "debt added");
    client_debt(state, client_id).await
}

/// Records a payment towards a client's balance.
pub async fn pay_debt(
    state: &AppState,
    client_id: &str,
    amount: Money,
    payment_type: PaymentMethod,
) -> Result<DebtView, ApiError> {
    state
        .store
        .with_store_mut(|s| s.pay_debt(client_id, amount, payment_type))?;
    info!(client_id, amount = %amount, "debt payment recorded");
    client_debt(state, client_id).await
}

// =============================================================================
// Unit Tests
// =============================================================================
