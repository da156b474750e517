//! Operator notifications.
//!
//! `NotificationSink` is the capability the broker and the operator surface
//! are given. Calls are fire-and-forget: nothing is returned and delivery
//! failures stay inside the sink.

mod command;

use std::path::PathBuf;
use std::sync::Arc;

pub use command::CommandSink;

use crate::config::{NotificationSection, NotifyBackend};

/// One desktop-style notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub icon: Option<PathBuf>,
    pub wait: bool,
    pub id: i32,
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, n: Notification);
}

/// Builds notifications with the configured title and icon.
#[derive(Debug, Clone)]
pub struct Notifier {
    title: String,
    icon: Option<PathBuf>,
}

impl Notifier {
    pub fn new(cfg: &NotificationSection) -> Self {
        Self {
            title: cfg.title.clone(),
            icon: cfg.icon.clone(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn build(&self, message: impl Into<String>) -> Notification {
        Notification {
            title: self.title.clone(),
            message: message.into(),
            icon: self.icon.clone(),
            wait: true,
            id: 0,
        }
    }
}

/// Emits notifications as tracing events.
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, n: Notification) {
        tracing::info!(title = %n.title, id = n.id, "{}", n.message);
    }
}

/// Drops everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _n: Notification) {}
}

/// Pick the sink for the configured backend.
pub fn sink_from_config(cfg: &NotificationSection) -> Arc<dyn NotificationSink> {
    match cfg.backend {
        NotifyBackend::Log => Arc::new(LogSink),
        NotifyBackend::Command => Arc::new(CommandSink::new(cfg.command.clone())),
        NotifyBackend::None => Arc::new(NullSink),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_uses_configured_title_and_icon() {
        let cfg = NotificationSection {
            icon: Some(PathBuf::from("/opt/sbot/icon.png")),
            ..NotificationSection::default()
        };
        let n = Notifier::new(&cfg).build("hello");
        assert_eq!(n.title, "Secure Scuttlebutt");
        assert_eq!(n.icon.as_deref(), Some(std::path::Path::new("/opt/sbot/icon.png")));
        assert!(n.wait);
        assert_eq!(n.id, 0);
    }
}
