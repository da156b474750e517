//! Shared application state for the sbot host daemon.
//!
//! Boot order mirrors the launcher: identity, plugin stack, manifest, then
//! the discovery gate and operator surface, all sharing one grant store.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use sbot_host_core::error::Result;

use crate::access::{AccessBroker, BrokerHandle, GrantStateStore};
use crate::config::HostConfig;
use crate::identity::{self, Keys};
use crate::notify::{NotificationSink, Notifier};
use crate::obs::metrics::HostMetrics;
use crate::operator::{OperatorSurface, TrayMenu};
use crate::plugins::{self, PluginRegistry};
use crate::shutdown::ShutdownController;

const SECRET_FILE: &str = "secret";
const BROKER_QUEUE: usize = 256;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: HostConfig,
    keys: Keys,
    plugins: PluginRegistry,
    manifest_path: PathBuf,
    grants: GrantStateStore,
    broker: BrokerHandle,
    operator: OperatorSurface,
    shutdown: Arc<ShutdownController>,
    metrics: Arc<HostMetrics>,
}

impl AppState {
    /// Build application state. Must run inside a tokio runtime (spawns the broker).
    pub fn new(cfg: HostConfig, sink: Arc<dyn NotificationSink>) -> Result<Self> {
        // 1) Identity
        let data_path = cfg.data_path()?;
        let keys = identity::load_or_create(&data_path.join(SECRET_FILE))?;

        // 2) Plugin stack + manifest
        let plugins = plugins::compose(&cfg.plugins)?;
        let manifest_path = plugins::write_manifest(&data_path, &plugins.manifest())?;

        // 3) Access gate and operator surface share one grant store
        let grants = GrantStateStore::new();
        let metrics = Arc::new(HostMetrics::default());
        let shutdown = Arc::new(ShutdownController::new());
        let notifier = Notifier::new(&cfg.notifications);

        let broker = AccessBroker::new(
            grants.clone(),
            Arc::clone(&sink),
            notifier.clone(),
            Arc::clone(&metrics),
        );
        let (broker, _task) = broker.spawn(BROKER_QUEUE);

        let mut menu = TrayMenu::standard(notifier.title(), grants.current());
        if let Some(icon) = &cfg.notifications.icon {
            menu = menu.with_icon_file(icon);
        }
        let operator = OperatorSurface::new(
            grants.clone(),
            menu,
            sink,
            notifier,
            Arc::clone(&shutdown),
            Duration::from_millis(cfg.shutdown.grace_ms),
            Arc::clone(&metrics),
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                keys,
                plugins,
                manifest_path,
                grants,
                broker,
                operator,
                shutdown,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &HostConfig {
        &self.inner.cfg
    }

    pub fn keys(&self) -> &Keys {
        &self.inner.keys
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.inner.plugins
    }

    pub fn manifest_path(&self) -> &Path {
        &self.inner.manifest_path
    }

    pub fn grants(&self) -> &GrantStateStore {
        &self.inner.grants
    }

    pub fn broker(&self) -> BrokerHandle {
        self.inner.broker.clone()
    }

    pub fn operator(&self) -> &OperatorSurface {
        &self.inner.operator
    }

    pub fn shutdown(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.inner.shutdown)
    }

    pub fn metrics(&self) -> &HostMetrics {
        &self.inner.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
