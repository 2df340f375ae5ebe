//! # MiniPOS Terminal Entry Point
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load configuration (file + `MINIPOS_*` environment overrides)
//! 3. Open the data directory and load collections
//! 4. Assemble application state and report readiness
//!
//! The command surface in `pos_app::commands` is what a frontend binds to;
//! this binary boots the backend and logs a startup summary.

use tracing::{error, info};

#[tokio::main]
async fn main() {
    pos_app::init_tracing();

    let config = pos_app::state::AppConfig::load(&pos_app::config_path());

    let state = match pos_app::bootstrap(config) {
        Ok(state) => state,
        Err(err) => {
            error!("Startup failed: {}", err);
            std::process::exit(1);
        }
    };

    let (products, receipts, clients) = state.store.with_store(|s| {
        (s.products().len(), s.receipts().len(), s.clients().len())
    });
    info!(
        products,
        receipts,
        clients,
        cashiers = state.config.cashiers.len(),
        "MiniPOS ready"
    );
}
