//! One-shot discovery over plain HTTP: `GET /v1/discovery/request?origin=...`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use sbot_host_core::protocol::DiscoveryFrame;

use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestQuery {
    pub origin: String,
}

pub async fn discovery_request(
    State(app): State<AppState>,
    Query(q): Query<RequestQuery>,
) -> Response {
    match app.broker().request(q.origin).await {
        Ok(decision) => Json(DiscoveryFrame::response(&decision)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "discovery request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(DiscoveryFrame::error(&e))).into_response()
        }
    }
}
