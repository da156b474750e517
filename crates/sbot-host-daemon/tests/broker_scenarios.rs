//! Discovery gate scenarios driven through the public API.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sbot_host_daemon::access::{AccessBroker, GrantStateStore};
use sbot_host_daemon::config::NotificationSection;
use sbot_host_daemon::notify::{Notification, NotificationSink, Notifier};
use sbot_host_daemon::obs::metrics::HostMetrics;
use sbot_host_daemon::operator::{OperatorSurface, TrayMenu};
use sbot_host_daemon::shutdown::ShutdownController;

#[derive(Default)]
struct Recorder(Mutex<Vec<Notification>>);

impl Recorder {
    fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().iter().map(|n| n.message.clone()).collect()
    }
}

impl NotificationSink for Recorder {
    fn notify(&self, n: Notification) {
        self.0.lock().unwrap().push(n);
    }
}

struct Rig {
    grants: GrantStateStore,
    broker: AccessBroker,
    operator: OperatorSurface,
    sink: Arc<Recorder>,
    metrics: Arc<HostMetrics>,
}

fn rig() -> Rig {
    let grants = GrantStateStore::new();
    let sink = Arc::new(Recorder::default());
    let metrics = Arc::new(HostMetrics::default());
    let cfg = NotificationSection::default();
    let notifier = Notifier::new(&cfg);
    let broker = AccessBroker::new(grants.clone(), sink.clone(), notifier.clone(), metrics.clone());
    let operator = OperatorSurface::new(
        grants.clone(),
        TrayMenu::standard(notifier.title(), grants.current()),
        sink.clone(),
        notifier,
        Arc::new(ShutdownController::new()),
        Duration::from_millis(2000),
        metrics.clone(),
    );
    Rig { grants, broker, operator, sink, metrics }
}

#[test]
fn deny_then_grant_after_operator_toggle() {
    let r = rig();
    assert!(!r.grants.current());

    let d = r.broker.handle_request("https://app.example");
    assert_eq!(d.origin, "https://app.example");
    assert!(!d.granted);
    let msgs = r.sink.messages();
    assert!(msgs[0].contains("denied"));
    assert!(msgs[0].starts_with("Web Application"));

    r.operator.click(0).unwrap();
    assert!(r.grants.current());

    let d = r.broker.handle_request("moz-extension://abc123");
    assert_eq!(d.origin, "moz-extension://abc123");
    assert!(d.granted);
    let last = r.sink.messages().pop().unwrap();
    assert!(last.contains("granted"));
    assert!(last.contains("Firefox Add-on"));

    assert_eq!(r.metrics.discovery_decisions.get(&[("granted", "false")]), 1);
    assert_eq!(r.metrics.discovery_decisions.get(&[("granted", "true")]), 1);
    assert_eq!(r.metrics.operator_clicks.get(&[("item", "grant")]), 1);
}

#[test]
fn decisions_are_not_revised_after_toggle() {
    let r = rig();
    let before = r.broker.handle_request("https://a");
    r.operator.click(0).unwrap();
    let after = r.broker.handle_request("https://a");
    assert!(!before.granted);
    assert!(after.granted);
}

#[tokio::test]
async fn channel_broker_serves_concurrent_requesters() {
    let r = rig();
    r.grants.toggle();
    let (handle, task) = r.broker.spawn(8);

    let mut joins = Vec::new();
    for i in 0..20 {
        let h = handle.clone();
        joins.push(tokio::spawn(async move { h.request(format!("https://app{i}.example")).await }));
    }
    for (i, j) in joins.into_iter().enumerate() {
        let d = j.await.unwrap().unwrap();
        assert_eq!(d.origin, format!("https://app{i}.example"));
        assert!(d.granted);
    }

    drop(handle);
    task.await.unwrap();
    assert_eq!(r.sink.messages().len(), 20);
}
