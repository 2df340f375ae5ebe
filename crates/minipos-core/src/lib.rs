//! # minipos-core: Pure Business Logic for MiniPOS
//!
//! This crate is the **heart** of MiniPOS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MiniPOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Frontend (Web UI)                          │   │
//! │  │    Catalog ──► Cart ──► Payment ──► History / Reports / Debts  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command calls                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Application Commands                         │   │
//! │  │    add_to_cart, pay_cash, cancel_receipt, daily_report, etc.   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ minipos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  report   │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  daily    │  │   │
//! │  │   │  Receipt  │  │  minor    │  │  discount │  │  summary  │  │   │
//! │  │   │  Debt     │  │  units    │  │  clamping │  │  top-5    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 minipos-store (Persistence Layer)               │   │
//! │  │          Domain collections, key-value JSON persistence         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Receipt, Client, Debt, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The transient cart and its checkout math
//! - [`report`] - Daily sales aggregation (pure, recomputed per view)
//! - [`ticket`] - Receipt-printer markup generation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in minor units (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod report;
pub mod ticket;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use minipos_core::Money` instead of
// `use minipos_core::money::Money`

pub use cart::Cart;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default point-of-sale identifier for single-till deployments.
///
/// ## Why a constant?
/// v0.1 runs a single till, but every product and receipt carries a
/// `point_id` so a multi-till rollout does not need a schema change.
pub const DEFAULT_POINT_ID: &str = "1";

/// Maximum unique items allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QTY: i64 = 999;
