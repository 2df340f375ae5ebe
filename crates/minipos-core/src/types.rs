//! # Domain Types
//!
//! Core domain types used throughout MiniPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Receipt     │   │      Debt       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  barcode        │   │  number (bus.)  │   │  client_id      │       │
//! │  │  name           │   │  items[]        │   │  entries[]      │       │
//! │  │  price          │   │  total/discount │   │  (append-only)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │  ReceiptStatus  │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id, name,      │   │  Paid           │   │  Cash           │       │
//! │  │  phone          │   │  Cancelled      │   │  Qr             │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Receipts have:
//! - `id`: UUID v4 - immutable, used for relations and lookups
//! - `number`: display number derived from the receipt count - what the
//!   cashier reads out and the ticket prints
//!
//! ## Snapshot Pattern
//! `ReceiptItem` freezes the product name and price at sale time. Historical
//! receipts never change when the catalog is edited or a product is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry available for sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Point of sale this product belongs to.
    pub point_id: String,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Unit price in minor units.
    pub price: Money,

    /// Category label (free text).
    pub category: String,

    /// Marks items shown in the quick-access grid.
    pub is_fast_product: bool,

    /// Image URL for the catalog grid (may be empty).
    pub image_url: String,

    /// Barcode (EAN-13, UPC-A, etc.). Unique within a point of sale when
    /// the store policy enforces it.
    pub barcode: Option<String>,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for catalog registration: everything except the assigned identity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub point_id: String,
    pub name: String,
    pub price: Money,
    pub category: String,
    pub is_fast_product: bool,
    pub image_url: String,
    pub barcode: Option<String>,
}

/// Partial update for a product. `None` fields are left unchanged.
///
/// ## Example
/// ```rust
/// use minipos_core::{Money, ProductPatch};
///
/// // Only reprice; everything else untouched
/// let patch = ProductPatch {
///     price: Some(Money::from_minor(2500)),
///     ..ProductPatch::default()
/// };
/// assert!(patch.name.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub category: Option<String>,
    pub is_fast_product: Option<bool>,
    pub image_url: Option<String>,
    pub barcode: Option<String>,
}

impl Product {
    /// Applies a partial update in place. Unset fields keep their value.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(fast) = patch.is_fast_product {
            self.is_fast_product = fast;
        }
        if let Some(url) = patch.image_url {
            self.image_url = url;
        }
        if let Some(barcode) = patch.barcode {
            self.barcode = Some(barcode);
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A registered customer. Immutable after registration in this scope.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub phone: String,
}

/// Input for client registration.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewClient {
    pub name: String,
    pub phone: String,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale or a debt payment was settled.
///
/// `Cash` is immediate; `Qr` requires a confirmation step via a displayed
/// QR payload before the sale commits. Both converge on the same commit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// QR payment confirmed against a displayed payload.
    Qr,
}

// =============================================================================
// Receipt Status
// =============================================================================

/// The status of a committed receipt.
///
/// ## Lifecycle
/// Created only in `Paid` state at checkout; transitions once, monotonically,
/// to `Cancelled` (terminal) with a mandatory non-empty reason. Receipts are
/// never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    /// Sale has been paid and committed.
    Paid,
    /// Sale was cancelled after the fact (reason recorded).
    Cancelled,
}

// =============================================================================
// Receipt Item
// =============================================================================

/// A line item on a receipt.
/// Uses the snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptItem {
    /// Line identifier (UUID v4).
    pub id: String,
    /// Product this line refers to (may no longer exist in the catalog).
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    /// Quantity sold (integer >= 1).
    pub qty: i64,
    /// Unit price at time of sale (frozen).
    pub price: Money,
}

impl ReceiptItem {
    /// Returns the line total (`price × qty`).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.qty)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A committed sale transaction.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Display number derived from the receipt count ("1001", "1002", ...).
    pub number: String,
    pub point_id: String,
    pub cashier_id: String,
    pub cashier_name: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    /// Ordered line items (snapshots).
    pub items: Vec<ReceiptItem>,
    /// Sum of line totals before discount.
    pub subtotal: Money,
    /// Absolute discount, `0 <= discount <= subtotal`.
    pub discount: Money,
    /// `subtotal - discount`.
    pub total: Money,
    pub payment_type: PaymentMethod,
    pub status: ReceiptStatus,
    /// Present iff `status == Cancelled`. Never overwritten.
    pub cancel_reason: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A receipt waiting for its identity: everything the checkout flow knows
/// before the store assigns `id` and `number`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReceiptDraft {
    pub point_id: String,
    pub cashier_id: String,
    pub cashier_name: String,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub items: Vec<ReceiptItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub payment_type: PaymentMethod,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Checks whether the receipt still counts towards revenue.
    #[inline]
    pub fn is_paid(&self) -> bool {
        self.status == ReceiptStatus::Paid
    }
}

// =============================================================================
// Debt Ledger
// =============================================================================

/// Kind of a debt ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DebtEntryKind {
    /// Goods taken on credit: increases the balance.
    Debt,
    /// Money received: decreases the balance.
    Payment,
}

/// Derived state of a debt ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    /// Outstanding balance > 0.
    Active,
    /// Balance <= 0. Reopens automatically on the next debt entry.
    Closed,
}

/// One entry in a client's debt ledger. Append-only; never mutated or
/// removed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DebtEntry {
    pub id: String,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    pub kind: DebtEntryKind,
    pub amount: Money,
    /// Only present for payment entries.
    pub payment_type: Option<PaymentMethod>,
    /// Only present for debt entries.
    pub comment: Option<String>,
}

impl DebtEntry {
    /// Creates a `Debt` entry (goods taken on credit).
    pub fn debt(amount: Money, comment: Option<String>) -> Self {
        DebtEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: Utc::now(),
            kind: DebtEntryKind::Debt,
            amount,
            payment_type: None,
            comment,
        }
    }

    /// Creates a `Payment` entry (money received towards the balance).
    pub fn payment(amount: Money, payment_type: PaymentMethod) -> Self {
        DebtEntry {
            id: uuid::Uuid::new_v4().to_string(),
            date: Utc::now(),
            kind: DebtEntryKind::Payment,
            amount,
            payment_type: Some(payment_type),
            comment: None,
        }
    }
}

/// A client's debt ledger: one record per client, holding the full
/// append-only entry history.
///
/// ## Single Source of Truth
/// The running balance is NOT stored. It is derived from the entries at read
/// time via [`Debt::balance`], so the cached-amount/entry-history pair can
/// never drift apart.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                      Debt Ledger Derivation                             │
/// │                                                                         │
/// │  entries: [debt 300] [payment 100] [debt 50] [payment 300]             │
/// │                                                                         │
/// │  balance() = 300 - 100 + 50 - 300 = -50                                 │
/// │  status()  = Closed            (balance <= 0)                           │
/// │                                                                         │
/// │  append [debt 200] → balance() = 150, status() = Active                 │
/// │  (no explicit "reopen" transition needed)                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Debt {
    pub id: String,
    pub client_id: String,
    /// Ordered, append-only entry history.
    pub entries: Vec<DebtEntry>,
}

impl Debt {
    /// Creates a fresh ledger for a client with a single opening entry.
    pub fn open(client_id: impl Into<String>, first_entry: DebtEntry) -> Self {
        Debt {
            id: uuid::Uuid::new_v4().to_string(),
            client_id: client_id.into(),
            entries: vec![first_entry],
        }
    }

    /// Current balance: sum of debt entries minus sum of payment entries.
    /// May be negative when a client overpaid (customer credit).
    pub fn balance(&self) -> Money {
        self.entries
            .iter()
            .map(|e| match e.kind {
                DebtEntryKind::Debt => e.amount,
                DebtEntryKind::Payment => Money::zero() - e.amount,
            })
            .sum()
    }

    /// Derived status: `Closed` iff the balance is zero or below.
    pub fn status(&self) -> DebtStatus {
        if self.balance().is_positive() {
            DebtStatus::Active
        } else {
            DebtStatus::Closed
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_item_line_total() {
        let item = ReceiptItem {
            id: "l1".to_string(),
            product_id: "p1".to_string(),
            product_name: "Cola".to_string(),
            qty: 3,
            price: Money::from_minor(299),
        };
        assert_eq!(item.line_total(), Money::from_minor(897));
    }

    #[test]
    fn test_product_patch_partial_merge() {
        let mut product = Product {
            id: "p1".to_string(),
            point_id: "1".to_string(),
            name: "Cola".to_string(),
            price: Money::from_minor(5000),
            category: "Drinks".to_string(),
            is_fast_product: false,
            image_url: String::new(),
            barcode: None,
            created_at: Utc::now(),
        };

        product.apply_patch(ProductPatch {
            price: Some(Money::from_minor(5500)),
            is_fast_product: Some(true),
            ..ProductPatch::default()
        });

        assert_eq!(product.price, Money::from_minor(5500));
        assert!(product.is_fast_product);
        // Untouched fields keep their values
        assert_eq!(product.name, "Cola");
        assert_eq!(product.category, "Drinks");
    }

    #[test]
    fn test_debt_balance_is_derived_from_entries() {
        let mut debt = Debt::open("c1", DebtEntry::debt(Money::from_minor(30000), None));
        assert_eq!(debt.balance(), Money::from_minor(30000));
        assert_eq!(debt.status(), DebtStatus::Active);

        debt.entries
            .push(DebtEntry::payment(Money::from_minor(10000), PaymentMethod::Cash));
        assert_eq!(debt.balance(), Money::from_minor(20000));
        assert_eq!(debt.status(), DebtStatus::Active);

        debt.entries
            .push(DebtEntry::payment(Money::from_minor(30000), PaymentMethod::Cash));
        assert_eq!(debt.balance(), Money::from_minor(-10000));
        assert_eq!(debt.status(), DebtStatus::Closed);

        // A new debt entry reopens the ledger without any explicit transition
        debt.entries
            .push(DebtEntry::debt(Money::from_minor(20000), None));
        assert_eq!(debt.balance(), Money::from_minor(10000));
        assert_eq!(debt.status(), DebtStatus::Active);
    }

    #[test]
    fn test_payment_method_serde_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
        assert_eq!(serde_json::to_string(&PaymentMethod::Qr).unwrap(), "\"qr\"");
        assert_eq!(
            serde_json::to_string(&ReceiptStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
