//! # Domain Store
//!
//! The single owner of durable state: catalog, receipt history, clients and
//! debt ledgers. All mutations flow through here so cross-collection rules
//! (numbering, uniqueness, cancellation) have one enforcement point.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutation Lifecycle                                   │
//! │                                                                         │
//! │  Command (app layer)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Validate input          (minipos-core validators)                   │
//! │  2. Check store rules       (policy: uniqueness, double-cancel)         │
//! │  3. Stage the mutation      (on a copy of the collection)               │
//! │  4. Persist the staged copy (serialize whole Vec → KvStore::put)        │
//! │  5. Swap the copy in                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Err at any step → nothing persisted, collection unchanged              │
//! │  (a failed write never leaves memory ahead of storage)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence happens on every mutation; there is no dirty-flag or
//! batching. Collections are small (hundreds of products, thousands of
//! receipts), so the staging clone is cheap. Receipts are kept
//! most-recent-first (new receipts are prepended), matching how the history
//! screen reads them.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use minipos_core::types::{
    Client, Debt, DebtEntry, NewClient, NewProduct, PaymentMethod, Product, ProductPatch, Receipt,
    ReceiptDraft, ReceiptStatus,
};
use minipos_core::validation::{
    validate_barcode, validate_cancel_reason, validate_client_name, validate_debt_amount,
    validate_payment_amount, validate_phone, validate_price, validate_product_name,
};
use minipos_core::Money;

use crate::error::{StoreError, StoreResult};
use crate::kv::KvStore;
use crate::policy::StorePolicy;

// ====== Collection Keys ======

const KEY_PRODUCTS: &str = "products";
const KEY_RECEIPTS: &str = "receipts";
const KEY_CLIENTS: &str = "clients";
const KEY_DEBTS: &str = "debts";

/// Receipt numbers start above this base so the first sale prints "1001".
const RECEIPT_NUMBER_BASE: usize = 1000;

// =============================================================================
// DomainStore
// =============================================================================

/// KV-backed domain store. Collections are held in memory; every mutation
/// writes the whole collection back before it becomes visible.
pub struct DomainStore {
    kv: Box<dyn KvStore>,
    policy: StorePolicy,
    products: Vec<Product>,
    receipts: Vec<Receipt>,
    clients: Vec<Client>,
    debts: Vec<Debt>,
}

impl std::fmt::Debug for DomainStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainStore")
            .field("policy", &self.policy)
            .field("products", &self.products)
            .field("receipts", &self.receipts)
            .field("clients", &self.clients)
            .field("debts", &self.debts)
            .finish_non_exhaustive()
    }
}

impl DomainStore {
    /// Opens a store over a backend, loading every collection. A key the
    /// backend has never seen loads as an empty collection, so first launch
    /// needs no setup.
    pub fn open(kv: Box<dyn KvStore>, policy: StorePolicy) -> StoreResult<Self> {
        let products = load_collection(kv.as_ref(), KEY_PRODUCTS)?;
        let receipts = load_collection(kv.as_ref(), KEY_RECEIPTS)?;
        let clients = load_collection(kv.as_ref(), KEY_CLIENTS)?;
        let debts = load_collection(kv.as_ref(), KEY_DEBTS)?;

        debug!(
            products = products.len(),
            receipts = receipts.len(),
            clients = clients.len(),
            debts = debts.len(),
            "store opened"
        );

        Ok(DomainStore {
            kv,
            policy,
            products,
            receipts,
            clients,
            debts,
        })
    }

    pub fn policy(&self) -> &StorePolicy {
        &self.policy
    }

    // ====== Catalog ======

    /// Registers a new product and returns it with its assigned identity.
    pub fn add_product(&mut self, new: NewProduct) -> StoreResult<Product> {
        validate_product_name(&new.name)?;
        validate_price(new.price)?;
        if let Some(barcode) = &new.barcode {
            validate_barcode(barcode)?;
            self.check_barcode_free(barcode, None)?;
        }

        let product = Product {
            id: Uuid::new_v4().to_string(),
            point_id: new.point_id,
            name: new.name.trim().to_string(),
            price: new.price,
            category: new.category,
            is_fast_product: new.is_fast_product,
            image_url: new.image_url,
            barcode: new.barcode,
            created_at: Utc::now(),
        };

        let mut products = self.products.clone();
        products.push(product.clone());
        persist_collection(self.kv.as_mut(), KEY_PRODUCTS, &products)?;
        self.products = products;

        debug!(id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    /// Applies a partial update to a product. Unset patch fields keep their
    /// current values.
    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> StoreResult<Product> {
        if let Some(name) = &patch.name {
            validate_product_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }
        if let Some(barcode) = &patch.barcode {
            validate_barcode(barcode)?;
            self.check_barcode_free(barcode, Some(id))?;
        }

        let idx = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))?;

        let mut products = self.products.clone();
        products[idx].apply_patch(patch);
        let updated = products[idx].clone();
        persist_collection(self.kv.as_mut(), KEY_PRODUCTS, &products)?;
        self.products = products;

        debug!(id = %updated.id, "product updated");
        Ok(updated)
    }

    /// Removes a product from the catalog. Past receipts keep their frozen
    /// name/price snapshots and are unaffected.
    pub fn delete_product(&mut self, id: &str) -> StoreResult<()> {
        let mut products = self.products.clone();
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }

        persist_collection(self.kv.as_mut(), KEY_PRODUCTS, &products)?;
        self.products = products;

        debug!(id, "product deleted");
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &str) -> StoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    /// Looks a product up by barcode. When duplicates are allowed by policy,
    /// resolves to the first match in registration order.
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.barcode.as_deref() == Some(barcode))
    }

    fn check_barcode_free(&self, barcode: &str, exclude_id: Option<&str>) -> StoreResult<()> {
        if !self.policy.enforce_unique_barcodes {
            return Ok(());
        }

        let taken = self.products.iter().any(|p| {
            p.barcode.as_deref() == Some(barcode) && Some(p.id.as_str()) != exclude_id
        });
        if taken {
            return Err(StoreError::duplicate("barcode", barcode));
        }
        Ok(())
    }

    // ====== Receipts ======

    /// Commits a sale: assigns the UUID id and the display number, then
    /// prepends the receipt so history reads most-recent-first.
    ///
    /// The display number is derived from the receipt count
    /// (`1000 + count + 1`), so the first sale is "1001". Cancelled receipts
    /// stay in the log and keep counting.
    pub fn add_receipt(&mut self, draft: ReceiptDraft) -> StoreResult<Receipt> {
        let number = (RECEIPT_NUMBER_BASE + self.receipts.len() + 1).to_string();

        let receipt = Receipt {
            id: Uuid::new_v4().to_string(),
            number,
            point_id: draft.point_id,
            cashier_id: draft.cashier_id,
            cashier_name: draft.cashier_name,
            client_id: draft.client_id,
            client_name: draft.client_name,
            items: draft.items,
            subtotal: draft.subtotal,
            discount: draft.discount,
            total: draft.total,
            payment_type: draft.payment_type,
            status: ReceiptStatus::Paid,
            cancel_reason: None,
            created_at: draft.created_at,
        };

        let mut receipts = self.receipts.clone();
        receipts.insert(0, receipt.clone());
        persist_collection(self.kv.as_mut(), KEY_RECEIPTS, &receipts)?;
        self.receipts = receipts;

        debug!(number = %receipt.number, total = %receipt.total, "receipt committed");
        Ok(receipt)
    }

    /// Cancels a paid receipt with a mandatory reason.
    ///
    /// The receipt stays in the log (its number is never reused) but stops
    /// counting towards reports. A second cancellation never overwrites the
    /// original reason; whether it errors or no-ops is a policy decision.
    pub fn cancel_receipt(&mut self, id: &str, reason: &str) -> StoreResult<Receipt> {
        let reason = validate_cancel_reason(reason)?;

        let idx = self
            .receipts
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("Receipt", id))?;

        if self.receipts[idx].status == ReceiptStatus::Cancelled {
            if self.policy.reject_double_cancel {
                return Err(StoreError::AlreadyCancelled {
                    number: self.receipts[idx].number.clone(),
                });
            }
            return Ok(self.receipts[idx].clone());
        }

        let mut receipts = self.receipts.clone();
        receipts[idx].status = ReceiptStatus::Cancelled;
        receipts[idx].cancel_reason = Some(reason);
        let cancelled = receipts[idx].clone();
        persist_collection(self.kv.as_mut(), KEY_RECEIPTS, &receipts)?;
        self.receipts = receipts;

        debug!(number = %cancelled.number, "receipt cancelled");
        Ok(cancelled)
    }

    /// Receipts, most recent first.
    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn receipt(&self, id: &str) -> StoreResult<&Receipt> {
        self.receipts
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found("Receipt", id))
    }

    // ====== Clients ======

    /// Registers a client.
    pub fn add_client(&mut self, new: NewClient) -> StoreResult<Client> {
        validate_client_name(&new.name)?;
        validate_phone(&new.phone)?;

        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            phone: new.phone.trim().to_string(),
        };

        let mut clients = self.clients.clone();
        clients.push(client.clone());
        persist_collection(self.kv.as_mut(), KEY_CLIENTS, &clients)?;
        self.clients = clients;

        debug!(id = %client.id, "client registered");
        Ok(client)
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn client(&self, id: &str) -> StoreResult<&Client> {
        self.clients
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found("Client", id))
    }

    // ====== Debt Ledger ======

    /// Records goods taken on credit. Creates the client's ledger on first
    /// use; later entries append to the existing one (reopening it if the
    /// balance had dropped to zero).
    pub fn add_debt(
        &mut self,
        client_id: &str,
        amount: Money,
        comment: Option<String>,
    ) -> StoreResult<Debt> {
        validate_debt_amount(amount)?;
        self.client(client_id)?;

        let entry = DebtEntry::debt(amount, comment);
        let mut debts = self.debts.clone();
        let debt = match debts.iter_mut().find(|d| d.client_id == client_id) {
            Some(debt) => {
                debt.entries.push(entry);
                debt.clone()
            }
            None => {
                let debt = Debt::open(client_id, entry);
                debts.push(debt.clone());
                debt
            }
        };
        persist_collection(self.kv.as_mut(), KEY_DEBTS, &debts)?;
        self.debts = debts;

        debug!(client_id, amount = %amount, "debt recorded");
        Ok(debt)
    }

    /// Records a payment towards a client's debt. The client must already
    /// have a ledger; overpayment is allowed and shows as negative balance
    /// (or zero, when the policy floors reads).
    pub fn pay_debt(
        &mut self,
        client_id: &str,
        amount: Money,
        payment_type: PaymentMethod,
    ) -> StoreResult<Debt> {
        validate_payment_amount(amount)?;

        let mut debts = self.debts.clone();
        let debt = debts
            .iter_mut()
            .find(|d| d.client_id == client_id)
            .ok_or_else(|| StoreError::not_found("Debt ledger for client", client_id))?;

        debt.entries.push(DebtEntry::payment(amount, payment_type));
        let updated = debt.clone();
        persist_collection(self.kv.as_mut(), KEY_DEBTS, &debts)?;
        self.debts = debts;

        debug!(client_id, amount = %amount, "debt payment recorded");
        Ok(updated)
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn debt_for_client(&self, client_id: &str) -> Option<&Debt> {
        self.debts.iter().find(|d| d.client_id == client_id)
    }

    /// A client's balance as shown to the user, with the zero-floor policy
    /// applied. A client with no ledger owes zero.
    pub fn debt_balance(&self, client_id: &str) -> Money {
        let balance = self
            .debt_for_client(client_id)
            .map(|d| d.balance())
            .unwrap_or_else(Money::zero);

        if self.policy.floor_debt_at_zero {
            balance.floor_zero()
        } else {
            balance
        }
    }
}

fn load_collection<T: DeserializeOwned>(kv: &dyn KvStore, key: &str) -> StoreResult<Vec<T>> {
    match kv.get(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
            collection: key.to_string(),
            message: err.to_string(),
        }),
        None => Ok(Vec::new()),
    }
}

fn persist_collection<T: Serialize>(
    kv: &mut dyn KvStore,
    key: &str,
    items: &[T],
) -> StoreResult<()> {
    let raw = serde_json::to_string(items).map_err(|err| StoreError::Persistence(err.to_string()))?;
    kv.put(key, &raw)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileKv, MemoryKv};
    use minipos_core::types::ReceiptItem;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn memory_store() -> DomainStore {
        DomainStore::open(Box::new(MemoryKv::new()), StorePolicy::default()).unwrap()
    }

    fn new_product(name: &str, price_minor: i64, barcode: Option<&str>) -> NewProduct {
        NewProduct {
            point_id: "1".to_string(),
            name: name.to_string(),
            price: Money::from_minor(price_minor),
            category: "Drinks".to_string(),
            is_fast_product: false,
            image_url: String::new(),
            barcode: barcode.map(str::to_string),
        }
    }

    fn draft_for(product: &Product, qty: i64) -> ReceiptDraft {
        let item = ReceiptItem {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            qty,
            price: product.price,
        };
        let subtotal = item.line_total();
        ReceiptDraft {
            point_id: "1".to_string(),
            cashier_id: "u1".to_string(),
            cashier_name: "Aisha".to_string(),
            client_id: None,
            client_name: None,
            items: vec![item],
            subtotal,
            discount: Money::zero(),
            total: subtotal,
            payment_type: PaymentMethod::Cash,
            created_at: Utc::now(),
        }
    }

    /// In-memory backend whose writes can be failed on demand.
    struct FlakyKv {
        inner: MemoryKv,
        fail_writes: Arc<AtomicBool>,
    }

    impl FlakyKv {
        fn new(fail_writes: Arc<AtomicBool>) -> Self {
            FlakyKv {
                inner: MemoryKv::new(),
                fail_writes,
            }
        }
    }

    impl KvStore for FlakyKv {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key)
        }

        fn put(&mut self, key: &str, value: &str) -> StoreResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Persistence("disk full".to_string()));
            }
            self.inner.put(key, value)
        }
    }

    // ====== Catalog ======

    #[test]
    fn test_add_and_patch_product() {
        let mut store = memory_store();
        let product = store
            .add_product(new_product("Cola", 5500, Some("4870001234567")))
            .unwrap();

        let updated = store
            .update_product(
                &product.id,
                ProductPatch {
                    price: Some(Money::from_minor(6000)),
                    ..ProductPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.price, Money::from_minor(6000));
        assert_eq!(updated.name, "Cola");
    }

    #[test]
    fn test_duplicate_barcode_rejected_by_default() {
        let mut store = memory_store();
        store
            .add_product(new_product("Cola", 5500, Some("111")))
            .unwrap();

        let err = store
            .add_product(new_product("Fanta", 5000, Some("111")))
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { .. }));
    }

    #[test]
    fn test_duplicate_barcode_allowed_when_policy_relaxed() {
        let policy = StorePolicy {
            enforce_unique_barcodes: false,
            ..StorePolicy::default()
        };
        let mut store = DomainStore::open(Box::new(MemoryKv::new()), policy).unwrap();

        store
            .add_product(new_product("Cola", 5500, Some("111")))
            .unwrap();
        store
            .add_product(new_product("Fanta", 5000, Some("111")))
            .unwrap();

        // Lookup resolves to the first match in registration order
        assert_eq!(store.find_by_barcode("111").unwrap().name, "Cola");
    }

    #[test]
    fn test_update_product_keeps_own_barcode() {
        let mut store = memory_store();
        let product = store
            .add_product(new_product("Cola", 5500, Some("111")))
            .unwrap();

        // Re-submitting the same barcode on the same product is not a duplicate
        store
            .update_product(
                &product.id,
                ProductPatch {
                    barcode: Some("111".to_string()),
                    ..ProductPatch::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn test_delete_missing_product_is_not_found() {
        let mut store = memory_store();
        let err = store.delete_product("nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    // ====== Receipts ======

    #[test]
    fn test_receipt_numbering_and_order() {
        let mut store = memory_store();
        let product = store.add_product(new_product("Cola", 5500, None)).unwrap();

        let first = store.add_receipt(draft_for(&product, 1)).unwrap();
        let second = store.add_receipt(draft_for(&product, 2)).unwrap();

        assert_eq!(first.number, "1001");
        assert_eq!(second.number, "1002");
        // Most recent first
        assert_eq!(store.receipts()[0].number, "1002");
        assert_eq!(store.receipts()[1].number, "1001");
    }

    #[test]
    fn test_cancel_receipt_records_reason() {
        let mut store = memory_store();
        let product = store.add_product(new_product("Cola", 5500, None)).unwrap();
        let receipt = store.add_receipt(draft_for(&product, 1)).unwrap();

        let cancelled = store.cancel_receipt(&receipt.id, "  wrong item  ").unwrap();
        assert_eq!(cancelled.status, ReceiptStatus::Cancelled);
        assert_eq!(cancelled.cancel_reason.as_deref(), Some("wrong item"));
    }

    #[test]
    fn test_cancel_requires_reason() {
        let mut store = memory_store();
        let product = store.add_product(new_product("Cola", 5500, None)).unwrap();
        let receipt = store.add_receipt(draft_for(&product, 1)).unwrap();

        let err = store.cancel_receipt(&receipt.id, "   ").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.receipt(&receipt.id).unwrap().is_paid());
    }

    #[test]
    fn test_double_cancel_rejected_and_reason_kept() {
        let mut store = memory_store();
        let product = store.add_product(new_product("Cola", 5500, None)).unwrap();
        let receipt = store.add_receipt(draft_for(&product, 1)).unwrap();

        store.cancel_receipt(&receipt.id, "first reason").unwrap();
        let err = store.cancel_receipt(&receipt.id, "second reason").unwrap_err();
        assert!(matches!(err, StoreError::AlreadyCancelled { .. }));

        assert_eq!(
            store.receipt(&receipt.id).unwrap().cancel_reason.as_deref(),
            Some("first reason")
        );
    }

    #[test]
    fn test_double_cancel_noop_when_policy_relaxed() {
        let policy = StorePolicy {
            reject_double_cancel: false,
            ..StorePolicy::default()
        };
        let mut store = DomainStore::open(Box::new(MemoryKv::new()), policy).unwrap();
        let product = store.add_product(new_product("Cola", 5500, None)).unwrap();
        let receipt = store.add_receipt(draft_for(&product, 1)).unwrap();

        store.cancel_receipt(&receipt.id, "first reason").unwrap();
        let again = store.cancel_receipt(&receipt.id, "second reason").unwrap();

        // No-op: original reason survives
        assert_eq!(again.cancel_reason.as_deref(), Some("first reason"));
    }

    // ====== Debts ======

    #[test]
    fn test_debt_lifecycle() {
        let mut store = memory_store();
        let client = store
            .add_client(NewClient {
                name: "Bakyt".to_string(),
                phone: "+996 555 123456".to_string(),
            })
            .unwrap();

        // 300.00 on credit
        store
            .add_debt(&client.id, Money::from_minor(30000), None)
            .unwrap();
        assert_eq!(store.debt_balance(&client.id), Money::from_minor(30000));

        // Pay 100.00 cash → 200.00 outstanding
        let debt = store
            .pay_debt(&client.id, Money::from_minor(10000), PaymentMethod::Cash)
            .unwrap();
        assert_eq!(debt.balance(), Money::from_minor(20000));

        // Pay 300.00 more → overpaid by 100.00
        let debt = store
            .pay_debt(&client.id, Money::from_minor(30000), PaymentMethod::Cash)
            .unwrap();
        assert_eq!(debt.balance(), Money::from_minor(-10000));
        assert_eq!(store.debt_balance(&client.id), Money::from_minor(-10000));
    }

    #[test]
    fn test_debt_balance_floored_by_policy() {
        let policy = StorePolicy {
            floor_debt_at_zero: true,
            ..StorePolicy::default()
        };
        let mut store = DomainStore::open(Box::new(MemoryKv::new()), policy).unwrap();
        let client = store
            .add_client(NewClient {
                name: "Bakyt".to_string(),
                phone: "0555123456".to_string(),
            })
            .unwrap();

        store
            .add_debt(&client.id, Money::from_minor(10000), None)
            .unwrap();
        store
            .pay_debt(&client.id, Money::from_minor(30000), PaymentMethod::Qr)
            .unwrap();

        // Raw ledger balance is -200.00; the read is clamped to zero
        assert_eq!(store.debt_balance(&client.id), Money::zero());
    }

    #[test]
    fn test_debt_requires_known_client() {
        let mut store = memory_store();
        let err = store
            .add_debt("ghost", Money::from_minor(100), None)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_pay_debt_without_ledger_is_not_found() {
        let mut store = memory_store();
        let client = store
            .add_client(NewClient {
                name: "Bakyt".to_string(),
                phone: "0555123456".to_string(),
            })
            .unwrap();

        let err = store
            .pay_debt(&client.id, Money::from_minor(100), PaymentMethod::Cash)
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    // ====== Persistence ======

    #[test]
    fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let product_id;
        {
            let kv = FileKv::open(dir.path()).unwrap();
            let mut store = DomainStore::open(Box::new(kv), StorePolicy::default()).unwrap();
            let product = store.add_product(new_product("Cola", 5500, None)).unwrap();
            store.add_receipt(draft_for(&product, 2)).unwrap();
            product_id = product.id;
        }

        let kv = FileKv::open(dir.path()).unwrap();
        let store = DomainStore::open(Box::new(kv), StorePolicy::default()).unwrap();

        assert_eq!(store.products().len(), 1);
        assert_eq!(store.product(&product_id).unwrap().name, "Cola");
        assert_eq!(store.receipts().len(), 1);
        assert_eq!(store.receipts()[0].number, "1001");
        assert_eq!(store.receipts()[0].total, Money::from_minor(11000));
    }

    #[test]
    fn test_corrupt_collection_is_reported() {
        let mut kv = MemoryKv::new();
        kv.put("products", "not json").unwrap();

        let err = DomainStore::open(Box::new(kv), StorePolicy::default()).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_failed_write_leaves_collection_unchanged() {
        let fail = Arc::new(AtomicBool::new(false));
        let kv = FlakyKv::new(fail.clone());
        let mut store = DomainStore::open(Box::new(kv), StorePolicy::default()).unwrap();

        store.add_product(new_product("Cola", 5500, None)).unwrap();

        // Storage starts failing: the mutation must not become visible
        fail.store(true, Ordering::SeqCst);
        let err = store
            .add_product(new_product("Fanta", 5000, None))
            .unwrap_err();
        assert!(matches!(err, StoreError::Persistence(_)));
        assert_eq!(store.products().len(), 1);

        // Storage recovers: the store picks up where it left off
        fail.store(false, Ordering::SeqCst);
        store.add_product(new_product("Fanta", 5000, None)).unwrap();
        assert_eq!(store.products().len(), 2);
    }

    #[test]
    fn test_failed_write_leaves_receipt_paid() {
        let fail = Arc::new(AtomicBool::new(false));
        let kv = FlakyKv::new(fail.clone());
        let mut store = DomainStore::open(Box::new(kv), StorePolicy::default()).unwrap();

        let product = store.add_product(new_product("Cola", 5500, None)).unwrap();
        let receipt = store.add_receipt(draft_for(&product, 1)).unwrap();

        fail.store(true, Ordering::SeqCst);
        assert!(store.cancel_receipt(&receipt.id, "return").is_err());

        // Memory never got ahead of storage
        let current = store.receipt(&receipt.id).unwrap();
        assert!(current.is_paid());
        assert_eq!(current.cancel_reason, None);

        fail.store(false, Ordering::SeqCst);
        let cancelled = store.cancel_receipt(&receipt.id, "return").unwrap();
        assert_eq!(cancelled.status, ReceiptStatus::Cancelled);
    }
}
