//! Loopback tray affordance: read the menu, click an item.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use sbot_host_core::protocol::DiscoveryFrame;

use crate::app_state::AppState;
use crate::operator::ClickOutcome;

use super::status_for;

pub async fn menu(State(state): State<AppState>) -> Response {
    Json(state.operator().menu()).into_response()
}

pub async fn click(State(state): State<AppState>, Path(seq_id): Path<usize>) -> Response {
    match state.operator().click(seq_id) {
        Ok(ClickOutcome::Toggled { granted }) => Json(json!({
            "seq_id": seq_id,
            "granted": granted,
            "menu": state.operator().menu(),
        }))
        .into_response(),
        Ok(ClickOutcome::Quitting { grace, armed }) => Json(json!({
            "seq_id": seq_id,
            "exit_in_ms": grace.as_millis() as u64,
            "armed": armed,
        }))
        .into_response(),
        Err(e) => (status_for(e.client_code()), Json(DiscoveryFrame::error(&e))).into_response(),
    }
}
