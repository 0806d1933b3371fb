//! Printer configuration and connectivity handlers.
//!
//! Configuration is fixed at startup: every id resolves to the relay's
//! default printer and updates are acknowledged without being stored.
//! The id is never decoded, so no path segment can be rejected.

use axum::{Json, extract::State, http::Uri};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::Message;
use crate::printer::PrinterConfig;
use crate::server::state::AppState;

/// Result of a connectivity test.
#[derive(Debug, Serialize)]
pub struct PrinterStatus {
    pub connected: bool,
    pub error: String,
}

/// Handle GET /api/printer/config/:id.
pub async fn get_config(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Json<PrinterConfig> {
    debug!(path = %uri.path(), "Serving default printer config");
    Json(state.tickets.default_printer().clone())
}

/// Handle PUT /api/printer/config/:id.
pub async fn update_config(uri: Uri) -> Json<Message> {
    debug!(path = %uri.path(), "Printer config update acknowledged, not stored");
    Message::new("printer configuration updated successfully")
}

/// Handle POST /api/printer/test/:id - probe the default printer.
///
/// Always 200; reachability is reported in the body.
pub async fn test(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Json<PrinterStatus> {
    debug!(path = %uri.path(), "Testing default printer");
    let connected = state.tickets.test_connection().await;

    Json(PrinterStatus {
        connected,
        error: if connected {
            String::new()
        } else {
            "Could not connect to printer".to_string()
        },
    })
}
