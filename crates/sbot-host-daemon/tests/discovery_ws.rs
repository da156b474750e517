//! Discovery session over a real WebSocket connection.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use sbot_host_daemon::app_state::AppState;
use sbot_host_daemon::config::HostConfig;
use sbot_host_daemon::notify::{Notification, NotificationSink};
use sbot_host_daemon::router::build_router;

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Default)]
struct Recorder(Mutex<Vec<Notification>>);

impl NotificationSink for Recorder {
    fn notify(&self, n: Notification) {
        self.0.lock().unwrap().push(n);
    }
}

async fn serve(dir: &std::path::Path) -> (AppState, Arc<Recorder>, SocketAddr) {
    let mut cfg = HostConfig::default();
    cfg.host.path = Some(dir.to_path_buf());
    let sink = Arc::new(Recorder::default());
    let st = AppState::new(cfg, sink.clone()).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(st.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (st, sink, addr)
}

async fn connect(addr: SocketAddr) -> Client {
    let (ws, _) = connect_async(format!("ws://{addr}/v1/discovery")).await.unwrap();
    ws
}

/// Next text frame as JSON, skipping keepalive traffic.
async fn next_json(ws: &mut Client) -> serde_json::Value {
    loop {
        let msg = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("no frame within 5s")
            .expect("stream ended")
            .expect("read failed");
        match msg {
            Message::Ping(_) | Message::Pong(_) => continue,
            Message::Text(_) => return serde_json::from_str(msg.to_text().unwrap()).unwrap(),
            other => panic!("unexpected frame: {other:?}"),
        }
    }
}

#[tokio::test]
async fn garbage_frame_gets_error_and_session_stays_open() {
    let dir = tempfile::tempdir().unwrap();
    let (st, _, addr) = serve(dir.path()).await;
    let mut ws = connect(addr).await;

    ws.send(Message::text("hello sbot")).await.unwrap();
    let v = next_json(&mut ws).await;
    assert_eq!(v["type"], "error");
    assert_eq!(v["code"], "BAD_REQUEST");
    assert_eq!(st.metrics().discovery_decode_errors.get(&[("code", "BAD_REQUEST")]), 1);

    // Same connection still answers requests.
    ws.send(Message::text(r#"{"type":"discovery-request","origin":"https://app.example"}"#))
        .await
        .unwrap();
    let v = next_json(&mut ws).await;
    assert_eq!(v["type"], "discovery-response");
}

#[tokio::test]
async fn valid_request_gets_exactly_one_response() {
    let dir = tempfile::tempdir().unwrap();
    let (_, sink, addr) = serve(dir.path()).await;
    let mut ws = connect(addr).await;

    ws.send(Message::text(r#"{"type":"discovery-request","origin":"moz-extension://abc123"}"#))
        .await
        .unwrap();
    let v = next_json(&mut ws).await;
    assert_eq!(
        v,
        serde_json::json!({
            "type": "discovery-response",
            "origin": "moz-extension://abc123",
            "granted": false
        })
    );

    // Nothing else follows except keepalive pings.
    let extra = timeout(Duration::from_millis(300), next_json(&mut ws)).await;
    assert!(extra.is_err(), "unexpected second frame: {extra:?}");

    let seen = sink.0.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].message.contains("Firefox Add-on"));
}

#[tokio::test]
async fn oversized_frame_gets_error_then_close() {
    let dir = tempfile::tempdir().unwrap();
    let (st, sink, addr) = serve(dir.path()).await;
    let mut ws = connect(addr).await;

    let max = st.cfg().discovery.max_frame_bytes;
    ws.send(Message::text("x".repeat(max + 1))).await.unwrap();

    let v = next_json(&mut ws).await;
    assert_eq!(v["type"], "error");
    assert_eq!(v["code"], "BAD_REQUEST");

    // The server ends the session: a close frame, a clean end, or a reset.
    loop {
        match timeout(Duration::from_secs(5), ws.next()).await.expect("session not closed") {
            Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
            Some(Ok(other)) => panic!("frame after oversize error: {other:?}"),
        }
    }
    assert!(sink.0.lock().unwrap().is_empty());
}
