//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MINIPOS_*`)
//! 2. Config file (`config.json` in the data directory)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use minipos_store::StorePolicy;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Store name (printed as the ticket header)
    pub store_name: String,

    /// Point of sale identifier stamped on products and receipts
    pub point_id: String,

    /// Data directory for the JSON collections
    pub data_dir: PathBuf,

    /// Local printer helper endpoint (fire-and-forget POST target)
    pub print_endpoint: String,

    /// Base URL for QR payment payloads
    pub qr_payment_url: String,

    /// Store behavior flags
    pub policy: StorePolicy,

    /// Cashier accounts allowed to sign in
    pub cashiers: Vec<CashierAccount>,
}

/// A cashier account. The password is stored as a SHA-256 hex digest, never
/// in the clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashierAccount {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_sha256: String,
    pub point_id: String,
}

impl Default for AppConfig {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Store: "Eldik Kassa"
    /// - Data: `./minipos-data`
    /// - Printer: local helper on port 3001
    /// - No cashier accounts (sign-in impossible until configured)
    fn default() -> Self {
        AppConfig {
            store_name: "Eldik Kassa".to_string(),
            point_id: minipos_core::DEFAULT_POINT_ID.to_string(),
            data_dir: PathBuf::from("minipos-data"),
            print_endpoint: "http://localhost:3001/print".to_string(),
            qr_payment_url: "https://eldikkassa.ustaz.tech/payment".to_string(),
            policy: StorePolicy::default(),
            cashiers: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration: file (if present) merged over defaults, then
    /// environment overrides on top.
    ///
    /// ## Environment Variables
    /// - `MINIPOS_DATA_DIR`: Override data directory
    /// - `MINIPOS_STORE_NAME`: Override store name
    /// - `MINIPOS_PRINT_ENDPOINT`: Override printer helper URL
    pub fn load(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(config) => config,
                Err(err) => {
                    warn!("Ignoring unreadable config {}: {}", path.display(), err);
                    AppConfig::default()
                }
            },
            Err(_) => AppConfig::default(),
        };

        if let Ok(dir) = std::env::var("MINIPOS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(name) = std::env::var("MINIPOS_STORE_NAME") {
            config.store_name = name;
        }
        if let Ok(endpoint) = std::env::var("MINIPOS_PRINT_ENDPOINT") {
            config.print_endpoint = endpoint;
        }

        config
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/config.json"));
        assert_eq!(config.store_name, "Eldik Kassa");
        assert!(config.cashiers.is_empty());
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"storeName":"Corner Shop"}"#).unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.store_name, "Corner Shop");
        // Untouched fields keep defaults
        assert_eq!(config.print_endpoint, "http://localhost:3001/print");
    }
}
