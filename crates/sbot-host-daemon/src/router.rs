//! Axum router wiring.
//!
//! Discovery (WS + one-shot HTTP), the operator affordance and ops endpoints
//! share one loopback listener.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/discovery", get(transport::ws::ws_upgrade))
        .route("/v1/discovery/request", get(transport::http::discovery_request))
        .route("/v1/operator/menu", get(ops::operator::menu))
        .route("/v1/operator/click/:seq_id", post(ops::operator::click))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
