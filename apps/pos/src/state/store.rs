//! # Store State
//!
//! Shared handle to the domain store.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may read/modify collections
//! 2. Only one command should mutate at a time (persist is not reentrant)
//! 3. Commands can run concurrently

use std::sync::{Arc, Mutex};

use minipos_store::DomainStore;

/// Shared, mutex-guarded domain store.
pub struct StoreState {
    store: Arc<Mutex<DomainStore>>,
}

impl StoreState {
    pub fn new(store: DomainStore) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = state.store.with_store(|s| s.products().len());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DomainStore) -> R,
    {
        let store = self.store.lock().expect("Store mutex poisoned");
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut DomainStore) -> R,
    {
        let mut store = self.store.lock().expect("Store mutex poisoned");
        f(&mut store)
    }
}
