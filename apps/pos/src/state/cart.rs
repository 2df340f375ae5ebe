//! # Cart State
//!
//! Shared handle to the active cart. The cart logic itself lives in
//! `minipos-core`; this wrapper only adds thread safety.
//!
//! ## Thread Safety
//! `Arc<Mutex<Cart>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//!
//! ## Why Not RwLock?
//! Cart operations are quick and most of them write. An RwLock would add
//! complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use minipos_core::Cart;

/// Shared, mutex-guarded cart.
#[derive(Debug)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = state.cart.with_cart(CartTotals::from);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.cart.with_cart_mut(|cart| cart.add_product(&product, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
