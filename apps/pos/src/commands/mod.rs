//! # Command Surface
//!
//! The operations the frontend can invoke, grouped by screen.
//!
//! ## Command Groups
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  auth      login / logout / current cashier                             │
//! │  catalog   product CRUD, search, fast grid, barcode lookup              │
//! │  cart      add / qty / remove / discount / client / view                │
//! │  checkout  cash + QR payment, shared commit path                        │
//! │  history   receipt list, detail, cancel, export                         │
//! │  report    daily summary                                                │
//! │  debt      ledger view, add debt, record payment                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command takes `&AppState` and returns `Result<_, ApiError>`; the
//! response DTOs serialize in camelCase for the frontend.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod debt;
pub mod history;
pub mod report;
