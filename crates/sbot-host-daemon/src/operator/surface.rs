use std::sync::{Arc, Mutex};
use std::time::Duration;

use sbot_host_core::error::{Result, HostError};

use crate::access::GrantStateStore;
use crate::notify::{NotificationSink, Notifier};
use crate::obs::metrics::HostMetrics;
use crate::operator::menu::{MenuAction, TrayMenu, GRANT_ITEM};
use crate::shutdown::ShutdownController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Grant flag after the toggle.
    Toggled { granted: bool },
    /// `armed` is false when a shutdown was already pending.
    Quitting { grace: Duration, armed: bool },
}

pub struct OperatorSurface {
    grants: GrantStateStore,
    menu: Mutex<TrayMenu>,
    sink: Arc<dyn NotificationSink>,
    notifier: Notifier,
    shutdown: Arc<ShutdownController>,
    grace: Duration,
    metrics: Arc<HostMetrics>,
}

impl OperatorSurface {
    pub fn new(
        grants: GrantStateStore,
        menu: TrayMenu,
        sink: Arc<dyn NotificationSink>,
        notifier: Notifier,
        shutdown: Arc<ShutdownController>,
        grace: Duration,
        metrics: Arc<HostMetrics>,
    ) -> Self {
        Self {
            grants,
            menu: Mutex::new(menu),
            sink,
            notifier,
            shutdown,
            grace,
            metrics,
        }
    }

    /// Snapshot of the menu as currently displayed.
    pub fn menu(&self) -> TrayMenu {
        self.menu.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn click(&self, seq_id: usize) -> Result<ClickOutcome> {
        let action = MenuAction::from_seq_id(seq_id)?;
        self.metrics.operator_clicks.inc(&[("item", action.label())]);
        match action {
            MenuAction::ToggleGrant => self.toggle_grant(),
            MenuAction::Quit => Ok(self.quit()),
        }
    }

    fn toggle_grant(&self) -> Result<ClickOutcome> {
        // Menu lock spans the flip so the checkmark never disagrees with the flag.
        let granted = {
            let mut menu = self.menu.lock().unwrap_or_else(|p| p.into_inner());
            let granted = self.grants.toggle();
            let mut item = menu
                .item(GRANT_ITEM)
                .cloned()
                .ok_or_else(|| HostError::Internal("grant item missing from menu".into()))?;
            item.checked = granted;
            menu.update_item(GRANT_ITEM, item)?;
            granted
        };

        tracing::info!(granted, "operator toggled discovery grants");
        let verb = if granted { "grant" } else { "deny" };
        self.sink.notify(self.notifier.build(format!(
            "{} will {verb} connections to sbot",
            self.notifier.title()
        )));
        self.metrics.notifications.inc(&[("kind", "toggle")]);

        Ok(ClickOutcome::Toggled { granted })
    }

    fn quit(&self) -> ClickOutcome {
        tracing::info!(grace_ms = self.grace.as_millis() as u64, "operator selected quit");
        self.sink.notify(self.notifier.build(format!(
            "{} will exit in {}...",
            self.notifier.title(),
            describe_grace(self.grace)
        )));
        self.metrics.notifications.inc(&[("kind", "quit")]);

        self.metrics.set_draining();
        let armed = self.shutdown.begin(self.grace);
        if !armed {
            tracing::debug!("shutdown already pending");
        }
        ClickOutcome::Quitting {
            grace: self.grace,
            armed,
        }
    }
}

/// Human phrasing of the grace delay, e.g. "two seconds".
pub fn describe_grace(grace: Duration) -> String {
    const WORDS: [&str; 10] = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    ];
    let ms = grace.as_millis();
    if ms % 1000 == 0 && (1..=10).contains(&(ms / 1000)) {
        let secs = (ms / 1000) as usize;
        let unit = if secs == 1 { "second" } else { "seconds" };
        return format!("{} {unit}", WORDS[secs - 1]);
    }
    format!("{ms} milliseconds")
}
