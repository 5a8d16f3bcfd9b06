//! Periodic status sampling with change-only pushes.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use memslot_common::{BridgeError, InboundMessage, ProcessStatus};
use memslot_config::HostConfig;
use tracing::{debug, info};

use crate::endpoint::ClientSink;
use crate::process::GameProcess;

pub struct StatusMonitor {
    process: Arc<dyn GameProcess>,
    sink: Arc<dyn ClientSink>,
    interval: Duration,
    last: Mutex<Option<ProcessStatus>>,
}

impl StatusMonitor {
    pub fn new(
        process: Arc<dyn GameProcess>,
        sink: Arc<dyn ClientSink>,
        interval: Duration,
    ) -> Self {
        Self {
            process,
            sink,
            interval,
            last: Mutex::new(None),
        }
    }

    pub fn from_config(
        config: &HostConfig,
        process: Arc<dyn GameProcess>,
        sink: Arc<dyn ClientSink>,
    ) -> Self {
        Self::new(process, sink, Duration::from_millis(config.status_interval_ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read the process status once and push it if it differs from the last
    /// pushed value. The first sample always pushes.
    ///
    /// Returns the pushed status, or `None` when nothing changed.
    pub fn sample(&self) -> Result<Option<ProcessStatus>, BridgeError> {
        let status = self.process.status();
        {
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            if *last == Some(status) {
                return Ok(None);
            }
            *last = Some(status);
        }

        debug!(
            offsets_loaded = status.offsets_loaded,
            process_attached = status.process_attached,
            "process status changed"
        );
        self.sink.deliver(InboundMessage::status(status))?;
        Ok(Some(status))
    }

    /// Sample on every tick until the sink stops accepting messages.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(interval_ms = self.interval.as_millis() as u64, "status monitor started");

        loop {
            ticker.tick().await;
            if let Err(e) = self.sample() {
                info!(error = %e, "status monitor stopped");
                return;
            }
        }
    }
}
