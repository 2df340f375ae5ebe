//! # Cart Commands
//!
//! Operations on the active cart, plus scan-to-cart resolution.

use serde::Serialize;
use tracing::debug;

use minipos_core::cart::CartTotals;
use minipos_core::types::{Client, ReceiptItem};
use minipos_core::Money;

use crate::error::ApiError;
use crate::state::AppState;

/// Full cart view for the checkout pane.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<ReceiptItem>,
    pub totals: CartTotals,
    pub client: Option<Client>,
}

/// What a scanned code resolved to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScanToCartResult {
    /// Matched a product; it is already in the cart.
    Added { product_name: String },
    /// Unknown code; the frontend offers quick registration.
    NotFound { code: String },
}

/// Adds one unit of a product to the cart (merging into an existing line).
pub async fn add_to_cart(state: &AppState, product_id: &str) -> Result<CartTotals, ApiError> {
    let product = state
        .store
        .with_store(|s| s.product(product_id).map(Clone::clone))?;

    state.cart.with_cart_mut(|cart| cart.add_product(&product))?;
    Ok(state.cart.with_cart(|cart| CartTotals::from(cart)))
}

/// Resolves a scanned barcode: adds the matching product to the cart, or
/// reports the unknown code so the frontend can offer registration.
pub async fn scan_to_cart(state: &AppState, code: &str) -> Result<ScanToCartResult, ApiError> {
    let product = state.store.with_store(|s| s.find_by_barcode(code).cloned());

    match product {
        Some(product) => {
            state.cart.with_cart_mut(|cart| cart.add_product(&product))?;
            debug!(code, product = %product.name, "scanned product added to cart");
            Ok(ScanToCartResult::Added {
                product_name: product.name,
            })
        }
        None => Ok(ScanToCartResult::NotFound {
            code: code.to_string(),
        }),
    }
}

/// Adjusts a line's quantity by a delta (the +/- buttons).
pub async fn adjust_quantity(
    state: &AppState,
    item_id: &str,
    delta: i64,
) -> Result<CartTotals, ApiError> {
    state
        .cart
        .with_cart_mut(|cart| cart.adjust_qty(item_id, delta))?;
    Ok(state.cart.with_cart(|cart| CartTotals::from(cart)))
}

/// Sets a line's quantity to an exact value.
pub async fn set_quantity(
    state: &AppState,
    item_id: &str,
    qty: i64,
) -> Result<CartTotals, ApiError> {
    state.cart.with_cart_mut(|cart| cart.set_qty(item_id, qty))?;
    Ok(state.cart.with_cart(|cart| CartTotals::from(cart)))
}

/// Removes a line from the cart.
pub async fn remove_from_cart(state: &AppState, item_id: &str) -> Result<CartTotals, ApiError> {
    state.cart.with_cart_mut(|cart| cart.remove_item(item_id))?;
    Ok(state.cart.with_cart(|cart| CartTotals::from(cart)))
}

/// Sets the cart discount (clamped to `[0, subtotal]`).
pub async fn set_discount(state: &AppState, discount: Money) -> Result<CartTotals, ApiError> {
    state.cart.with_cart_mut(|cart| cart.set_discount(discount));
    Ok(state.cart.with_cart(|cart| CartTotals::from(cart)))
}

/// Attaches a registered client to the cart, or detaches with `None`.
pub async fn select_client(
    state: &AppState,
    client_id: Option<String>,
) -> Result<(), ApiError> {
    if let Some(id) = &client_id {
        // Reject stale ids before they end up on a receipt
        state.store.with_store(|s| s.client(id).map(|_| ()))?;
    }
    state.cart.with_cart_mut(|cart| cart.select_client(client_id));
    Ok(())
}

/// Registers a client and selects them into the cart in one step (the
/// "new client" flow at checkout).
pub async fn register_client(
    state: &AppState,
    name: &str,
    phone: &str,
) -> Result<Client, ApiError> {
    let client = state.store.with_store_mut(|s| {
        s.add_client(minipos_core::types::NewClient {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    })?;

    state
        .cart
        .with_cart_mut(|cart| cart.select_client(Some(client.id.clone())));
    Ok(client)
}

/// Empties the cart (items, discount, and client selection).
pub async fn clear_cart(state: &AppState) -> Result<(), ApiError> {
    state.cart.with_cart_mut(|cart| cart.clear());
    Ok(())
}

/// Current cart contents and totals.
pub async fn get_cart(state: &AppState) -> Result<CartView, ApiError> {
    let (items, totals, client_id) = state.cart.with_cart(|cart| {
        (
            cart.items.clone(),
            CartTotals::from(cart),
            cart.client_id.clone(),
        )
    });

    let client = client_id.and_then(|id| {
        state
            .store
            .with_store(|s| s.client(&id).ok().cloned())
    });

    Ok(CartView {
        items,
        totals,
        client,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
