//! Single-slot register for host status pushes.

use std::sync::{Arc, Mutex, PoisonError};

use memslot_common::ProcessStatus;
use tracing::trace;

/// Callback receiving each status push.
pub type StatusListener = Arc<dyn Fn(ProcessStatus) + Send + Sync>;

/// Holds at most one listener. Last registration wins; pushes that arrive
/// while the slot is empty are dropped and never replayed.
#[derive(Clone, Default)]
pub struct StatusChannel {
    slot: Arc<Mutex<Option<StatusListener>>>,
}

impl StatusChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current listener. `None` deregisters.
    pub fn set_listener(&self, listener: Option<StatusListener>) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = listener;
    }

    /// Forward `status` to the registered listener, if any.
    ///
    /// The listener runs after the slot lock is released, so it may replace
    /// itself.
    pub fn deliver(&self, status: ProcessStatus) {
        let listener = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match listener {
            Some(listener) => listener(status),
            None => trace!(?status, "status push dropped: no listener"),
        }
    }
}
