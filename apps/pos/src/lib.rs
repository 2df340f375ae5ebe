//! # MiniPOS Application Library
//!
//! Application layer for the MiniPOS terminal: state, commands, and the
//! external collaborators (printer helper, barcode source).
//!
//! ## Module Organization
//! ```text
//! pos_app/
//! ├── lib.rs          ◄─── You are here (setup & startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState bundle
//! │   ├── store.rs    ◄─── DomainStore wrapper
//! │   ├── cart.rs     ◄─── Cart wrapper
//! │   ├── session.rs  ◄─── Signed-in cashier
//! │   └── config.rs   ◄─── Configuration loading
//! ├── commands/
//! │   ├── auth.rs     ◄─── Login / logout
//! │   ├── catalog.rs  ◄─── Product CRUD, search, barcode lookup
//! │   ├── cart.rs     ◄─── Cart manipulation, scan-to-cart
//! │   ├── checkout.rs ◄─── Cash + QR payment, commit path
//! │   ├── history.rs  ◄─── Receipt list / cancel / export
//! │   ├── report.rs   ◄─── Daily summary
//! │   └── debt.rs     ◄─── Debt book
//! ├── print.rs        ◄─── Printer helper client (fire-and-forget)
//! ├── scan.rs         ◄─── Barcode scanning state machine
//! ├── export.rs       ◄─── Receipt HTML export
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod export;
pub mod print;
pub mod scan;
pub mod state;

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use minipos_store::{DomainStore, FileKv, StoreResult};
use state::{AppConfig, AppState};

/// Initializes tracing (logging).
///
/// Default filter: INFO everywhere, DEBUG for our crates. Override with
/// `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,minipos=debug,pos_app=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Opens the store under the configured data directory and assembles the
/// application state.
pub fn bootstrap(config: AppConfig) -> StoreResult<AppState> {
    let kv = FileKv::open(&config.data_dir)?;
    let store = DomainStore::open(Box::new(kv), config.policy)?;

    info!(
        data_dir = %config.data_dir.display(),
        store = %config.store_name,
        "store opened"
    );

    Ok(AppState::new(config, store))
}

/// Resolves the config file path: `MINIPOS_CONFIG` override, else
/// `config.json` in the working directory.
pub fn config_path() -> std::path::PathBuf {
    std::env::var("MINIPOS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| Path::new("config.json").to_path_buf())
}
