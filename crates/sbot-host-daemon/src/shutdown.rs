//! Grace-period shutdown.
//!
//! `begin` arms one timer task. Once armed it fires after the full grace
//! delay regardless of what else happens in the process; only an explicit
//! `cancel` stops it. `wait` resolves after the timer fires or after
//! `trigger_now`.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

pub struct ShutdownController {
    tx: Arc<watch::Sender<bool>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            timer: Mutex::new(None),
        }
    }

    /// Arm the grace timer. Returns `false` when a timer is already armed or
    /// shutdown already happened; the running timer is left untouched.
    pub fn begin(&self, grace: Duration) -> bool {
        let mut slot = self.timer.lock().unwrap_or_else(|p| p.into_inner());
        if slot.is_some() || self.is_triggered() {
            return false;
        }

        let tx = Arc::clone(&self.tx);
        *slot = Some(tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            tracing::info!(grace_ms = grace.as_millis() as u64, "grace period elapsed, shutting down");
            tx.send_replace(true);
        }));
        true
    }

    /// Disarm a pending timer. Returns `true` if one was stopped before firing.
    pub fn cancel(&self) -> bool {
        let mut slot = self.timer.lock().unwrap_or_else(|p| p.into_inner());
        if self.is_triggered() {
            return false;
        }
        match slot.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Skip the grace period (signal path).
    pub fn trigger_now(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_armed(&self) -> bool {
        self.timer
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .is_some()
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Future that completes once shutdown is due.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            loop {
                if *rx.borrow_and_update() {
                    return;
                }
                if rx.changed().await.is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Instant};

    #[tokio::test(start_paused = true)]
    async fn fires_no_earlier_than_grace() {
        let ctl = ShutdownController::new();
        let start = Instant::now();
        assert!(ctl.begin(Duration::from_millis(2000)));

        assert!(timeout(Duration::from_millis(1999), ctl.wait()).await.is_err());
        assert!(!ctl.is_triggered());

        ctl.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert!(ctl.is_triggered());
    }

    #[tokio::test(start_paused = true)]
    async fn second_begin_does_not_reset_timer() {
        let ctl = ShutdownController::new();
        let start = Instant::now();
        assert!(ctl.begin(Duration::from_millis(2000)));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!ctl.begin(Duration::from_millis(2000)));

        ctl.wait().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(2000));
        assert!(elapsed < Duration::from_millis(3500));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_disarms() {
        let ctl = ShutdownController::new();
        ctl.begin(Duration::from_millis(100));
        assert!(ctl.cancel());
        assert!(!ctl.is_armed());
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!ctl.is_triggered());
    }

    #[tokio::test]
    async fn trigger_now_releases_waiters() {
        let ctl = ShutdownController::new();
        let waiter = ctl.wait();
        ctl.trigger_now();
        waiter.await;
        assert!(!ctl.begin(Duration::from_millis(10)));
    }
}
