//! # Print Collaborator
//!
//! Sends committed tickets to the local printer helper service.
//!
//! ## Fire-and-Forget
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Print Flow                                         │
//! │                                                                         │
//! │  commit_sale()                                                          │
//! │       │                                                                 │
//! │       ├──► receipt persisted (authoritative)                            │
//! │       │                                                                 │
//! │       └──► send_detached(request)   tokio::spawn                        │
//! │                 │                                                       │
//! │                 ├── POST http://localhost:3001/print  (single attempt)  │
//! │                 │                                                       │
//! │                 └── failure → warn! and drop                            │
//! │                                                                         │
//! │  A dead printer never blocks or fails a sale. The receipt is already    │
//! │  in history and can be re-printed from there.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, warn};

/// The JSON body the printer helper expects. Field names and the constant
/// `biz_type`/`broadcast_type` values are part of the helper's contract.
#[derive(Debug, Clone, Serialize)]
pub struct PrintRequest {
    /// Unique per request; millisecond timestamp string.
    pub request_id: String,
    pub biz_type: String,
    pub broadcast_type: String,
    /// Receipt total as a decimal string ("135.00").
    pub money: String,
    /// Ticket markup (see `minipos_core::ticket`).
    pub printdata: String,
}

impl PrintRequest {
    /// Builds a request for one committed ticket.
    pub fn new(money: String, printdata: String) -> Self {
        PrintRequest {
            request_id: chrono::Utc::now().timestamp_millis().to_string(),
            biz_type: "1".to_string(),
            broadcast_type: "1".to_string(),
            money,
            printdata,
        }
    }
}

/// HTTP client for the printer helper. Cheap to clone (shares the reqwest
/// connection pool).
#[derive(Debug, Clone)]
pub struct PrintClient {
    endpoint: String,
    http: reqwest::Client,
}

impl PrintClient {
    pub fn new(endpoint: String) -> Self {
        PrintClient {
            endpoint,
            http: reqwest::Client::new(),
        }
    }

    /// Sends a print request and reports the outcome. Used by tests and by
    /// explicit re-print actions.
    pub async fn send(&self, request: &PrintRequest) -> Result<(), reqwest::Error> {
        self.http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Dispatches a print request in the background. One attempt, no retry;
    /// failures are logged and dropped so checkout never blocks on the
    /// printer.
    pub fn send_detached(&self, request: PrintRequest) {
        let client = self.clone();
        tokio::spawn(async move {
            match client.send(&request).await {
                Ok(()) => debug!(request_id = %request.request_id, "ticket sent to printer"),
                Err(err) => warn!(
                    request_id = %request.request_id,
                    "printer unreachable, ticket dropped: {}", err
                ),
            }
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
