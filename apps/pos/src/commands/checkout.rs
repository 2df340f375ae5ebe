//! # Checkout Commands
//!
//! Cash and QR payment. Both converge on one commit path.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Paths                                    │
//! │                                                                         │
//! │  pay_cash() ───────────────────────────┐                                │
//! │                                        ▼                                │
//! │  begin_qr_payment() ──► QR shown ──► confirm_qr_payment() ──► commit    │
//! │                                                                         │
//! │  commit_sale:                                                           │
//! │  1. require signed-in cashier                                           │
//! │  2. snapshot cart → ReceiptDraft                                        │
//! │  3. store.add_receipt (id + number assigned, persisted)                 │
//! │  4. ticket → printer (fire-and-forget)                                  │
//! │  5. cart.clear()                                                        │
//! │                                                                         │
//! │  The receipt is authoritative the moment step 3 returns. A dead         │
//! │  printer does not undo a sale.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use minipos_core::error::CoreError;
use minipos_core::ticket::generate_print_data;
use minipos_core::types::{PaymentMethod, Receipt, ReceiptDraft};

use crate::error::ApiError;
use crate::print::PrintRequest;
use crate::state::AppState;

/// The QR payload shown to the customer while a QR payment is pending.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPaymentIntent {
    /// Encoded into the on-screen QR code.
    pub payload: String,
    /// Amount the customer is asked to pay, as a decimal string.
    pub amount: String,
}

/// Commits the cart as a cash sale.
pub async fn pay_cash(state: &AppState) -> Result<Receipt, ApiError> {
    commit_sale(state, PaymentMethod::Cash).await
}

/// Starts a QR payment: returns the payload to display. The cart is left
/// untouched until [`confirm_qr_payment`].
pub async fn begin_qr_payment(state: &AppState) -> Result<QrPaymentIntent, ApiError> {
    let total = state.cart.with_cart(|cart| {
        if cart.is_empty() {
            None
        } else {
            Some(cart.total())
        }
    });

    let total = total.ok_or_else(|| ApiError::from(CoreError::EmptyCart))?;
    let amount = total.decimal_string();

    Ok(QrPaymentIntent {
        payload: format!(
            "{}?amount={}&currency=KGS",
            state.config.qr_payment_url, amount
        ),
        amount,
    })
}

/// Commits the cart as a QR sale after the cashier confirms the customer
/// paid. Cancelling the QR dialog simply never calls this; the cart stays
/// as it was.
pub async fn confirm_qr_payment(state: &AppState) -> Result<Receipt, ApiError> {
    commit_sale(state, PaymentMethod::Qr).await
}

/// The single commit path behind both payment methods.
async fn commit_sale(
    state: &AppState,
    payment_type: PaymentMethod,
) -> Result<Receipt, ApiError> {
    let cashier = state
        .session
        .current()
        .ok_or_else(|| ApiError::auth("No cashier signed in"))?;

    let (items, subtotal, discount, total, client_id) = state.cart.with_cart(|cart| {
        (
            cart.items.clone(),
            cart.subtotal(),
            cart.effective_discount(),
            cart.total(),
            cart.client_id.clone(),
        )
    });

    if items.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let client_name = client_id.as_ref().and_then(|id| {
        state
            .store
            .with_store(|s| s.client(id).ok().map(|c| c.name.clone()))
    });

    let draft = ReceiptDraft {
        point_id: state.config.point_id.clone(),
        cashier_id: cashier.id,
        cashier_name: cashier.name,
        client_id,
        client_name,
        items,
        subtotal,
        discount,
        total,
        payment_type,
        created_at: Utc::now(),
    };

    let receipt = state.store.with_store_mut(|s| s.add_receipt(draft))?;

    // Receipt is persisted; printing is best-effort from here on
    let printdata = generate_print_data(
        &state.config.store_name,
        &receipt.items,
        receipt.total,
        receipt.discount,
        receipt.payment_type,
        receipt.created_at,
    );
    state
        .printer
        .send_detached(PrintRequest::new(receipt.total.decimal_string(), printdata));

    state.cart.with_cart_mut(|cart| cart.clear());

    info!(
        number = %receipt.number,
        total = %receipt.total,
        payment = ?receipt.payment_type,
        "sale committed"
    );
    Ok(receipt)
}

// =============================================================================
// Unit Tests
// =============================================================================
