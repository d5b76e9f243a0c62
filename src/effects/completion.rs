//! Exactly-once completion callbacks handed to external drawables.

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

/// Create a linked completion handle and the future that observes it.
pub fn channel() -> (CompletionHandle, CompletionWait) {
    let (tx, rx) = oneshot::channel();
    (
        CompletionHandle {
            slot: Arc::new(Mutex::new(Some(tx))),
        },
        CompletionWait { rx },
    )
}

/// Callback a drawable invokes when its transition ends.
///
/// Only the first [`CompletionHandle::fire`] is delivered; later calls, and
/// any call after [`CompletionHandle::disarm`], are ignored.
#[derive(Clone, Debug)]
pub struct CompletionHandle {
    slot: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

impl CompletionHandle {
    /// Report completion. Returns `false` when the call was ignored.
    pub fn fire(&self) -> bool {
        let sender = match self.slot.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        match sender {
            Some(tx) => {
                // A dropped receiver means the effect already moved on.
                let _ = tx.send(());
                true
            }
            None => {
                tracing::debug!("ignored repeated or late completion");
                false
            }
        }
    }

    /// Ignore every future `fire`.
    pub fn disarm(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            slot.take();
        }
    }

    /// True while a `fire` would still be delivered.
    pub fn is_armed(&self) -> bool {
        self.slot.lock().map(|s| s.is_some()).unwrap_or(false)
    }
}

/// How a [`CompletionWait`] resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The handle was fired.
    Fired,
    /// The handle was disarmed or every clone was dropped without firing.
    Abandoned,
}

/// Future side of [`channel`].
#[derive(Debug)]
pub struct CompletionWait {
    rx: oneshot::Receiver<()>,
}

impl CompletionWait {
    /// Wait for the handle to fire or be abandoned.
    pub async fn wait(self) -> WaitOutcome {
        match self.rx.await {
            Ok(()) => WaitOutcome::Fired,
            Err(_) => WaitOutcome::Abandoned,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/completion.rs"]
mod tests;
