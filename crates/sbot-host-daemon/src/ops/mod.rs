//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 once Quit has been selected)
//! - `/metrics` : Prometheus text format

pub mod operator;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sbot_host_core::error::ClientCode;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        state.metrics().render(),
    )
        .into_response()
}

pub(crate) fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::NotAllowed => StatusCode::FORBIDDEN,
        ClientCode::Config | ClientCode::Identity | ClientCode::Io | ClientCode::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
