//! # Session State
//!
//! Tracks the signed-in cashier. Receipts record who rang them up, so every
//! checkout requires an active session.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(email, password) ──► Some(Cashier)                               │
//! │  logout()               ──► None                                        │
//! │  commit_sale()          ──► requires Some(_), else AUTH_ERROR           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// The signed-in cashier, as recorded on receipts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cashier {
    pub id: String,
    pub name: String,
    pub point_id: String,
}

/// Shared, mutex-guarded session slot.
#[derive(Debug)]
pub struct SessionState {
    current: Arc<Mutex<Option<Cashier>>>,
}

impl SessionState {
    /// Creates a signed-out session.
    pub fn new() -> Self {
        SessionState {
            current: Arc::new(Mutex::new(None)),
        }
    }

    /// Signs a cashier in, replacing any previous session.
    pub fn sign_in(&self, cashier: Cashier) {
        let mut current = self.current.lock().expect("Session mutex poisoned");
        *current = Some(cashier);
    }

    /// Signs the current cashier out.
    pub fn sign_out(&self) {
        let mut current = self.current.lock().expect("Session mutex poisoned");
        *current = None;
    }

    /// Returns the signed-in cashier, if any.
    pub fn current(&self) -> Option<Cashier> {
        self.current.lock().expect("Session mutex poisoned").clone()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
