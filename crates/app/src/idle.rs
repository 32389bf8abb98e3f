//! "Yield until idle" primitive.
//!
//! Low-priority enrichment defers until the consumer signals idle time, or
//! until a timeout ceiling so the work is never starved indefinitely. Once
//! signaled, the gate stays open.

use std::time::Duration;

use tokio::sync::watch;

pub struct IdleGate {
    tx: watch::Sender<bool>,
}

impl IdleGate {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Mark the host as idle, releasing all current and future waiters.
    pub fn signal_idle(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_idle(&self) -> bool {
        *self.tx.borrow()
    }

    /// Wait until the gate opens or `timeout` elapses, whichever is first.
    pub async fn wait(&self, timeout: Duration) {
        let mut rx = self.tx.subscribe();
        if *rx.borrow() {
            return;
        }
        let _ = tokio::time::timeout(timeout, async {
            while !*rx.borrow_and_update() {
                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
        .await;
    }
}

impl Default for IdleGate {
    fn default() -> Self {
        Self::new()
    }
}
