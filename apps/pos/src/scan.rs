//! # Barcode Scanning
//!
//! Adapter between a barcode source (camera, USB wedge, test double) and the
//! cart. The source pushes decoded strings; the adapter owns the scanning
//! state machine and resolves codes against the catalog.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Scan Lifecycle                                     │
//! │                                                                         │
//! │            start() ok                                                   │
//! │   Idle ─────────────────► Scanning                                      │
//! │    ▲                         │                                          │
//! │    │  start() Err            ├── decode ok  → lookup → outcome → Idle   │
//! │    │  (stays Idle)           ├── decode err → ignored (frame noise)     │
//! │    └─────────────────────────┴── cancel()   → Idle                      │
//! │                                                                         │
//! │  Per-frame decode errors are expected (most frames contain no code)     │
//! │  and never surface to the user.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use minipos_core::types::Product;

/// Capture settings handed to the barcode source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanConfig {
    /// Decode attempts per second.
    pub fps: u32,
    /// Scan box width in pixels.
    pub box_width: u32,
    /// Scan box height in pixels.
    pub box_height: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            fps: 20,
            box_width: 300,
            box_height: 150,
        }
    }
}

/// Scanner failures that reach the user.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source could not start (no camera, permission denied).
    #[error("Scanner failed to start: {0}")]
    StartFailed(String),
}

/// Something that produces decoded barcode strings.
///
/// Implementations drive the hardware; the adapter calls `start`/`stop` and
/// receives decodes through [`ScanAdapter::handle_decode`].
pub trait BarcodeSource {
    fn start(&mut self, config: &ScanConfig) -> Result<(), ScanError>;
    fn stop(&mut self);
}

/// Adapter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning,
}

/// What a successful decode resolved to.
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// The code matched a catalog product; add it to the cart.
    AddToCart(Product),
    /// No product carries this barcode; offer quick registration.
    NotFound(String),
}

/// Owns a barcode source and the scanning state machine.
pub struct ScanAdapter<S: BarcodeSource> {
    source: S,
    config: ScanConfig,
    state: ScanState,
}

impl<S: BarcodeSource> ScanAdapter<S> {
    pub fn new(source: S, config: ScanConfig) -> Self {
        ScanAdapter {
            source,
            config,
            state: ScanState::Idle,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Starts scanning. On failure the adapter stays `Idle` and the error
    /// propagates to the caller.
    pub fn start(&mut self) -> Result<(), ScanError> {
        self.source.start(&self.config)?;
        self.state = ScanState::Scanning;
        debug!("scanner started");
        Ok(())
    }

    /// Stops scanning without an outcome.
    pub fn cancel(&mut self) {
        if self.state == ScanState::Scanning {
            self.source.stop();
            self.state = ScanState::Idle;
            debug!("scan cancelled");
        }
    }

    /// Handles one decoded string. The first successful decode resolves to
    /// an outcome via `lookup` and stops the source; decodes while `Idle`
    /// are dropped.
    pub fn handle_decode<F>(&mut self, code: &str, lookup: F) -> Option<ScanOutcome>
    where
        F: FnOnce(&str) -> Option<Product>,
    {
        if self.state != ScanState::Scanning {
            return None;
        }

        self.source.stop();
        self.state = ScanState::Idle;

        match lookup(code) {
            Some(product) => {
                debug!(code, product = %product.name, "barcode matched");
                Some(ScanOutcome::AddToCart(product))
            }
            None => {
                debug!(code, "barcode not in catalog");
                Some(ScanOutcome::NotFound(code.to_string()))
            }
        }
    }

    /// Handles a per-frame decode failure. Expected noise; ignored.
    pub fn handle_decode_error(&self) {
        trace!("frame without a decodable code");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
