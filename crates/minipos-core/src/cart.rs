//! # Cart Module
//!
//! The transient cart the cashier builds before checkout.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                    │
//! │                                                                         │
//! │  Cashier Action            Cart Method              Cart Change         │
//! │  ──────────────            ───────────              ───────────         │
//! │                                                                         │
//! │  Tap product ─────────────► add_product() ────────► merge or push line  │
//! │                                                                         │
//! │  +/- buttons ─────────────► adjust_qty() ─────────► qty ± 1 (min 1)     │
//! │                                                                         │
//! │  Type quantity ───────────► set_qty() ────────────► qty = n (1..=999)   │
//! │                                                                         │
//! │  Tap remove ──────────────► remove_item() ────────► line removed        │
//! │                                                                         │
//! │  Enter discount ──────────► set_discount() ───────► clamped [0,subtotal]│
//! │                                                                         │
//! │  Payment confirmed ───────► (checkout drains)  ───► clear()             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id` (adding the same product increments qty)
//! - Quantity is always >= 1 (adjusting below 1 clamps; removal is explicit)
//! - `discount` is clamped to `[0, subtotal]` centrally - the UI no longer
//!   has to be trusted with the bound
//! - The cart is transient: it is never persisted, only the committed
//!   receipt is

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ReceiptItem};
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QTY};

// =============================================================================
// Cart
// =============================================================================

/// The in-progress sale: ordered line items plus the checkout inputs that
/// accompany them (discount, selected client).
///
/// Lines are [`ReceiptItem`]s from the start - name and price are snapshotted
/// the moment a product is added, so a catalog edit mid-sale never changes
/// what the customer was quoted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Ordered line items (snapshots of the products added).
    pub items: Vec<ReceiptItem>,

    /// Absolute discount entered by the cashier, clamped to `[0, subtotal]`.
    pub discount: Money,

    /// Selected client, if the sale is attached to a registered customer.
    pub client_id: Option<String>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a product to the cart, or increments quantity if already present.
    ///
    /// ## Behavior
    /// - If the product is already in the cart: `qty += 1`
    /// - Otherwise: a new line is appended with a frozen name/price snapshot
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            if item.qty + 1 > MAX_ITEM_QTY {
                return Err(CoreError::QuantityTooLarge {
                    requested: item.qty + 1,
                    max: MAX_ITEM_QTY,
                });
            }
            item.qty += 1;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(ReceiptItem {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            qty: 1,
            price: product.price,
        });
        Ok(())
    }

    /// Adjusts a line's quantity by a delta, clamped to a minimum of 1.
    ///
    /// ## Behavior
    /// Matches the +/- buttons: going below 1 leaves the line at 1
    /// (removal is a separate, explicit action).
    pub fn adjust_qty(&mut self, item_id: &str, delta: i64) -> CoreResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotInCart(item_id.to_string()))?;

        let new_qty = (item.qty + delta).clamp(1, MAX_ITEM_QTY);
        item.qty = new_qty;
        Ok(())
    }

    /// Sets a line's quantity to an exact value (1..=999).
    pub fn set_qty(&mut self, item_id: &str, qty: i64) -> CoreResult<()> {
        validate_quantity(qty)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CoreError::ItemNotInCart(item_id.to_string()))?;

        item.qty = qty;
        Ok(())
    }

    /// Removes a line from the cart by its line id.
    pub fn remove_item(&mut self, item_id: &str) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != item_id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInCart(item_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Sets the discount, clamped centrally to `[0, subtotal]`.
    ///
    /// ## Why clamp instead of reject?
    /// The cashier types the discount while the cart is still changing;
    /// clamping keeps the invariant without bouncing the input back.
    pub fn set_discount(&mut self, discount: Money) {
        self.discount = discount.clamp_range(Money::zero(), self.subtotal());
    }

    /// Attaches or detaches the selected client.
    pub fn select_client(&mut self, client_id: Option<String>) {
        self.client_id = client_id;
    }

    /// Clears the cart, discount, and selected client.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = Money::zero();
        self.client_id = None;
    }

    /// Returns the number of unique lines in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.qty).sum()
    }

    /// Calculates the subtotal: `Σ qty × price` over the lines.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Effective discount: the stored discount re-clamped against the
    /// current subtotal (lines may have been removed since it was set).
    pub fn effective_discount(&self) -> Money {
        self.discount.clamp_range(Money::zero(), self.subtotal())
    }

    /// Calculates the grand total: `subtotal - discount`.
    pub fn total(&self) -> Money {
        self.subtotal() - self.effective_discount()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Totals Summary
// =============================================================================

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            discount: cart.effective_discount(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_POINT_ID;
    use chrono::Utc;

    fn test_product(id: &str, price_minor: i64) -> Product {
        Product {
            id: id.to_string(),
            point_id: DEFAULT_POINT_ID.to_string(),
            name: format!("Product {}", id),
            price: Money::from_minor(price_minor),
            category: "Drinks".to_string(),
            is_fast_product: true,
            image_url: String::new(),
            barcode: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_product() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_product(&product).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 1);
        assert_eq!(cart.subtotal(), Money::from_minor(999));
        // Snapshot frozen on the line
        assert_eq!(cart.items[0].product_name, "Product 1");
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();

        assert_eq!(cart.item_count(), 1); // Still one unique line
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), Money::from_minor(2997));
    }

    #[test]
    fn test_adjust_qty_clamps_at_one() {
        let mut cart = Cart::new();
        let product = test_product("1", 500);
        cart.add_product(&product).unwrap();
        let line_id = cart.items[0].id.clone();

        cart.adjust_qty(&line_id, 4).unwrap();
        assert_eq!(cart.items[0].qty, 5);

        // Going below 1 clamps, does not remove
        cart.adjust_qty(&line_id, -10).unwrap();
        assert_eq!(cart.items[0].qty, 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 500)).unwrap();
        cart.add_product(&test_product("2", 700)).unwrap();
        let line_id = cart.items[0].id.clone();

        cart.remove_item(&line_id).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal(), Money::from_minor(700));

        assert!(matches!(
            cart.remove_item("missing"),
            Err(CoreError::ItemNotInCart(_))
        ));
    }

    /// Spec example: cart = [{price 100, qty 2}], discount 50
    /// → subtotal = 200, total = 150.
    #[test]
    fn test_subtotal_and_discount_example() {
        let mut cart = Cart::new();
        let product = test_product("1", 10000); // 100.00
        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();

        cart.set_discount(Money::from_minor(5000)); // 50.00

        assert_eq!(cart.subtotal(), Money::from_minor(20000));
        assert_eq!(cart.total(), Money::from_minor(15000));
    }

    #[test]
    fn test_discount_clamped_to_subtotal() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1000)).unwrap();

        cart.set_discount(Money::from_minor(99999));
        assert_eq!(cart.effective_discount(), Money::from_minor(1000));
        assert_eq!(cart.total(), Money::zero());

        cart.set_discount(Money::from_minor(-500));
        assert_eq!(cart.effective_discount(), Money::zero());
    }

    #[test]
    fn test_discount_reclamped_after_removal() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1000)).unwrap();
        cart.add_product(&test_product("2", 2000)).unwrap();
        cart.set_discount(Money::from_minor(2500));

        // Dropping a line shrinks the subtotal below the stored discount
        let line_id = cart.items[1].id.clone();
        cart.remove_item(&line_id).unwrap();

        assert_eq!(cart.subtotal(), Money::from_minor(1000));
        assert_eq!(cart.effective_discount(), Money::from_minor(1000));
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 500)).unwrap();
        cart.set_discount(Money::from_minor(100));
        cart.select_client(Some("c1".to_string()));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.discount, Money::zero());
        assert!(cart.client_id.is_none());
    }

    #[test]
    fn test_cart_totals_summary() {
        let mut cart = Cart::new();
        let product = test_product("1", 10000);
        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();
        cart.set_discount(Money::from_minor(5000));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total_quantity, 2);
        assert_eq!(totals.subtotal, Money::from_minor(20000));
        assert_eq!(totals.total, Money::from_minor(15000));
    }
}
