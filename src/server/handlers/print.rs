//! Ticket printing handlers.

use axum::{Json, body::Bytes, extract::State};
use std::sync::Arc;
use tracing::error;

use super::{ApiError, Message};
use crate::error::RelayError;
use crate::server::state::AppState;
use crate::ticket::{TicketData, TicketType};
use crate::transport::Delivery;

/// Handle POST /api/printer/print/daypass.
pub async fn day_pass(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Message>, ApiError> {
    print(&state, &body, TicketType::DayPass).await
}

/// Handle POST /api/printer/print/exitpass.
pub async fn exit_pass(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Message>, ApiError> {
    print(&state, &body, TicketType::ExitPass).await
}

async fn print(
    state: &AppState,
    body: &[u8],
    kind: TicketType,
) -> Result<Json<Message>, ApiError> {
    match decode_and_print(state, body, kind).await {
        Ok(_) => Ok(Message::new(format!(
            "{} ticket printed successfully",
            kind.label()
        ))),
        Err(e) => {
            error!(%kind, error = %e, "Print failed");
            Err(ApiError::from(e))
        }
    }
}

async fn decode_and_print(
    state: &AppState,
    body: &[u8],
    kind: TicketType,
) -> Result<Delivery, RelayError> {
    let ticket: TicketData = serde_json::from_slice(body)?;
    state.tickets.print(&ticket, kind).await
}
