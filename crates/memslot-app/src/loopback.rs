//! In-process host wired to the client bridge over Tokio channels.
//!
//! The binding only enqueues the envelope, so every reply arrives on a
//! later tick through the router, as it would from a separate process.

use std::sync::Arc;

use memslot_bridge::{connect, Connection, HostBinding};
use memslot_common::{BridgeError, InboundMessage, StorageError};
use memslot_config::HostConfig;
use memslot_host::{ClientSink, GameProcess, HostEndpoint, StatusMonitor, UrlOpener};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct Loopback {
    pub connection: Connection,
    tasks: Vec<JoinHandle<()>>,
}

impl Loopback {
    /// Start the host with the system browser as link opener.
    pub fn spawn(config: &HostConfig, process: Arc<dyn GameProcess>) -> Result<Self, StorageError> {
        Self::spawn_with(config, process, None)
    }

    /// Start the host. Must be called inside a Tokio runtime.
    pub fn spawn_with(
        config: &HostConfig,
        process: Arc<dyn GameProcess>,
        opener: Option<Arc<dyn UrlOpener>>,
    ) -> Result<Self, StorageError> {
        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();
        let (inbound_tx, mut inbound_rx) = mpsc::unbounded_channel::<String>();

        let binding: Arc<dyn HostBinding> =
            Arc::new(move |message: &str| -> Result<(), BridgeError> {
                outbound_tx
                    .send(message.to_string())
                    .map_err(|_| BridgeError::Transport("host task stopped".into()))
            });
        let connection = connect(Some(binding));

        let sink: Arc<dyn ClientSink> =
            Arc::new(move |message: InboundMessage| -> Result<(), BridgeError> {
                let raw = message
                    .to_json()
                    .map_err(|e| BridgeError::Encode(e.to_string()))?;
                inbound_tx.send(raw).map_err(|_| BridgeError::Disconnected)
            });

        let mut endpoint =
            HostEndpoint::from_config(config, Arc::clone(&process), Arc::clone(&sink))?;
        if let Some(opener) = opener {
            endpoint = endpoint.with_opener(opener);
        }
        let monitor = Arc::new(StatusMonitor::from_config(config, process, sink));

        let mut tasks = Vec::with_capacity(3);

        // The endpoint does blocking file I/O; envelopes are still handled
        // one at a time, in arrival order.
        let endpoint = Arc::new(endpoint);
        tasks.push(tokio::spawn(async move {
            while let Some(raw) = outbound_rx.recv().await {
                let endpoint = Arc::clone(&endpoint);
                if let Err(e) = tokio::task::spawn_blocking(move || endpoint.handle(&raw)).await {
                    warn!(error = %e, "host handler panicked");
                }
            }
            debug!("host task finished");
        }));

        match connection.router.clone() {
            Some(router) => tasks.push(tokio::spawn(async move {
                while let Some(raw) = inbound_rx.recv().await {
                    router.route(&raw);
                }
                debug!("client inbound task finished");
            })),
            None => warn!("connection has no router, host replies will be dropped"),
        }

        tasks.push(tokio::spawn(monitor.run()));

        Ok(Self { connection, tasks })
    }
}

impl Drop for Loopback {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
