//! WebSocket discovery session.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS on `/v1/discovery`
//! - Length check before decode, then decode once
//! - Forward each request to the broker and write back its decision
//! - Lifecycle: ping/pong + idle timeout

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::time::{Duration, Instant};

use sbot_host_core::error::{Result, HostError};
use sbot_host_core::protocol::DiscoveryFrame;

use crate::app_state::AppState;
use crate::transport::codec::{decode, frame_len, Inbound};

fn frame_text(frame: &DiscoveryFrame) -> Option<Message> {
    match frame.to_json() {
        Ok(s) => Some(Message::Text(s)),
        Err(e) => {
            tracing::error!(error = %e, "dropping unencodable frame");
            None
        }
    }
}

pub async fn ws_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| async move {
        app.metrics().discovery_sessions.inc(&[]);
        if let Err(e) = run_session(app.clone(), socket).await {
            tracing::debug!(error = %e, "discovery session ended with error");
        }
        app.metrics().discovery_sessions.dec(&[]);
    })
}

async fn run_session(app: AppState, socket: WebSocket) -> Result<()> {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let broker = app.broker();

    let cfg = &app.cfg().discovery;
    let max_frame = cfg.max_frame_bytes;
    let idle_timeout = Duration::from_millis(cfg.idle_timeout_ms);
    let mut ping_tick = tokio::time::interval(Duration::from_millis(cfg.ping_interval_ms));
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut last_activity = Instant::now();

    loop {
        tokio::select! {
            incoming = ws_rx.next() => {
                let Some(Ok(msg)) = incoming else { break; };
                last_activity = Instant::now();

                if frame_len(&msg) > max_frame {
                    let err = HostError::BadRequest("frame too large".into());
                    if let Some(m) = frame_text(&DiscoveryFrame::error(&err)) {
                        let _ = ws_tx.send(m).await;
                    }
                    break;
                }

                match decode(msg) {
                    Ok(Inbound::Request(req)) => {
                        let decision = broker.request(req.origin).await?;
                        if let Some(m) = frame_text(&DiscoveryFrame::response(&decision)) {
                            ws_tx
                                .send(m)
                                .await
                                .map_err(|e| HostError::Internal(format!("ws write failed: {e}")))?;
                        }
                    }
                    Ok(Inbound::Ping(payload)) => {
                        let _ = ws_tx.send(Message::Pong(payload)).await;
                    }
                    Ok(Inbound::Pong) => {}
                    Ok(Inbound::Close) => break,
                    Err(e) => {
                        app.metrics().discovery_decode_errors.inc(&[("code", e.client_code().as_str())]);
                        if let Some(m) = frame_text(&DiscoveryFrame::error(&e)) {
                            let _ = ws_tx.send(m).await;
                        }
                    }
                }
            }

            _ = ping_tick.tick() => {
                if ws_tx.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }

            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if last_activity.elapsed() >= idle_timeout {
                    let err = HostError::BadRequest("idle timeout".into());
                    if let Some(m) = frame_text(&DiscoveryFrame::error(&err)) {
                        let _ = ws_tx.send(m).await;
                    }
                    break;
                }
            }
        }
    }

    Ok(())
}
