//! # Application State
//!
//! All state managed by the running terminal.
//!
//! ## State Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Application State                                  │
//! │                                                                         │
//! │  AppState (one per terminal, shared across commands)                    │
//! │  ├── config   AppConfig          read-only after startup               │
//! │  ├── store    StoreState         Mutex<DomainStore>                    │
//! │  ├── cart     CartState          Mutex<Cart>                           │
//! │  ├── session  SessionState       Mutex<Option<Cashier>>                │
//! │  └── printer  PrintClient        stateless HTTP client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod session;
mod store;

pub use cart::CartState;
pub use config::{AppConfig, CashierAccount};
pub use session::{Cashier, SessionState};
pub use store::StoreState;

use crate::print::PrintClient;

/// Everything a command needs, bundled for injection.
pub struct AppState {
    pub config: AppConfig,
    pub store: StoreState,
    pub cart: CartState,
    pub session: SessionState,
    pub printer: PrintClient,
}

impl AppState {
    /// Assembles application state around an opened store.
    pub fn new(config: AppConfig, store: minipos_store::DomainStore) -> Self {
        let printer = PrintClient::new(config.print_endpoint.clone());
        AppState {
            config,
            store: StoreState::new(store),
            cart: CartState::new(),
            session: SessionState::new(),
            printer,
        }
    }
}
