use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use sbot_host_core::error::{Result, HostError};
use sbot_host_core::protocol::{describe_decision, AccessDecision, AccessRequest};

use crate::access::GrantStateStore;
use crate::notify::{NotificationSink, Notifier};
use crate::obs::metrics::HostMetrics;

/// A request waiting in the broker queue plus the channel its answer goes to.
#[derive(Debug)]
pub struct PendingRequest {
    pub request: AccessRequest,
    pub respond_to: oneshot::Sender<AccessDecision>,
}

/// Gates discovery requests against the grant flag.
///
/// Stateless between requests: every decision is computed from the flag value
/// read at processing time and is never revised afterwards.
pub struct AccessBroker {
    grants: GrantStateStore,
    sink: Arc<dyn NotificationSink>,
    notifier: Notifier,
    metrics: Arc<HostMetrics>,
}

impl AccessBroker {
    pub fn new(
        grants: GrantStateStore,
        sink: Arc<dyn NotificationSink>,
        notifier: Notifier,
        metrics: Arc<HostMetrics>,
    ) -> Self {
        Self {
            grants,
            sink,
            notifier,
            metrics,
        }
    }

    /// Read the flag and build the decision. No side effects.
    pub fn decide(&self, origin: &str) -> AccessDecision {
        AccessDecision {
            origin: origin.to_string(),
            granted: self.grants.current(),
        }
    }

    /// Decide and notify the operator.
    pub fn handle_request(&self, origin: &str) -> AccessDecision {
        let decision = self.decide(origin);
        self.announce(&decision);
        decision
    }

    fn announce(&self, decision: &AccessDecision) {
        let granted = if decision.granted { "true" } else { "false" };
        self.metrics.discovery_decisions.inc(&[("granted", granted)]);
        tracing::info!(origin = %decision.origin, granted = decision.granted, "discovery request");

        let msg = describe_decision(&decision.origin, decision.granted);
        self.sink.notify(self.notifier.build(msg));
        self.metrics.notifications.inc(&[("kind", "decision")]);
    }

    /// Process queued requests in arrival order until every handle is dropped.
    pub async fn run(self, mut rx: mpsc::Receiver<PendingRequest>) {
        while let Some(pending) = rx.recv().await {
            let decision = self.decide(&pending.request.origin);
            // Requester may have gone away; the operator still hears about it.
            if pending.respond_to.send(decision.clone()).is_err() {
                tracing::debug!(origin = %decision.origin, "requester dropped before response");
            }
            self.announce(&decision);
        }
        tracing::debug!("access broker stopped");
    }

    /// Start the broker task and return the handle used to feed it.
    pub fn spawn(self, capacity: usize) -> (BrokerHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let task = tokio::spawn(self.run(rx));
        (BrokerHandle { tx }, task)
    }
}

/// Sending half of the broker queue.
#[derive(Clone)]
pub struct BrokerHandle {
    tx: mpsc::Sender<PendingRequest>,
}

impl BrokerHandle {
    /// Enqueue one request and wait for its decision.
    pub async fn request(&self, origin: impl Into<String>) -> Result<AccessDecision> {
        let (respond_to, rx) = oneshot::channel();
        let pending = PendingRequest {
            request: AccessRequest::new(origin),
            respond_to,
        };
        self.tx
            .send(pending)
            .await
            .map_err(|_| HostError::Internal("access broker is not running".into()))?;
        rx.await
            .map_err(|_| HostError::Internal("access broker dropped the request".into()))
    }
}
