//! Host side of the bridge: executes envelopes and answers through a
//! [`ClientSink`].

use std::sync::{Arc, Mutex, PoisonError};

use memslot_common::{ops, BridgeError, InboundMessage, InitInfo, OutboundEnvelope, StorageError};
use memslot_config::HostConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::opener::{is_openable, SystemUrlOpener, UrlOpener};
use crate::process::{GameProcess, ProcessError};
use crate::storage::{default_data_path, SlotStore};

/// Carries host messages back to the panel's inbound router.
pub trait ClientSink: Send + Sync {
    fn deliver(&self, message: InboundMessage) -> Result<(), BridgeError>;
}

impl<F> ClientSink for F
where
    F: Fn(InboundMessage) -> Result<(), BridgeError> + Send + Sync,
{
    fn deliver(&self, message: InboundMessage) -> Result<(), BridgeError> {
        self(message)
    }
}

/// Why an operation failed. The display text is what the panel receives
/// as the reply error.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("index {0} out of range")]
    IndexOutOfRange(usize),

    #[error("no data")]
    NoData,

    #[error("unsupported url: {0}")]
    UnsupportedUrl(String),

    #[error("failed to open url: {0}")]
    OpenFailed(String),

    #[error("reply encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Deserialize)]
struct IndexPayload {
    index: usize,
}

#[derive(Debug, Deserialize)]
struct RenamePayload {
    index: usize,
    name: String,
}

#[derive(Debug, Deserialize)]
struct UrlPayload {
    url: String,
}

pub struct HostEndpoint {
    store: SlotStore,
    process: Arc<dyn GameProcess>,
    opener: Arc<dyn UrlOpener>,
    external_url: String,
    sink: Arc<dyn ClientSink>,
    /// Serializes read-modify-write cycles on the slot file.
    store_lock: Mutex<()>,
}

impl HostEndpoint {
    pub fn new(
        store: SlotStore,
        process: Arc<dyn GameProcess>,
        opener: Arc<dyn UrlOpener>,
        external_url: impl Into<String>,
        sink: Arc<dyn ClientSink>,
    ) -> Self {
        Self {
            store,
            process,
            opener,
            external_url: external_url.into(),
            sink,
            store_lock: Mutex::new(()),
        }
    }

    /// Build an endpoint from config, opening links in the system browser.
    pub fn from_config(
        config: &HostConfig,
        process: Arc<dyn GameProcess>,
        sink: Arc<dyn ClientSink>,
    ) -> Result<Self, StorageError> {
        let path = match &config.data_file {
            Some(path) => path.clone(),
            None => default_data_path()?,
        };
        info!(path = %path.display(), slots = config.slot_count, "host endpoint ready");
        Ok(Self::new(
            SlotStore::new(path, config.slot_count as usize),
            process,
            Arc::new(SystemUrlOpener),
            config.external_url.clone(),
            sink,
        ))
    }

    pub fn with_opener(mut self, opener: Arc<dyn UrlOpener>) -> Self {
        self.opener = opener;
        self
    }

    /// Execute one raw envelope and send exactly one reply for it.
    ///
    /// Envelopes that cannot be parsed carry no usable token and are dropped.
    pub fn handle(&self, raw: &str) {
        let Some(envelope) = OutboundEnvelope::from_json(raw) else {
            warn!(body_len = raw.len(), "envelope rejected: failed to parse");
            return;
        };

        let token = envelope.callback.clone();
        let outcome = if ops::is_known(&envelope.kind) {
            self.execute(&envelope)
        } else {
            Err(EndpointError::UnknownOperation(envelope.kind.clone()))
        };
        let reply = match outcome {
            Ok(value) => {
                debug!(kind = %envelope.kind, %token, "operation completed");
                InboundMessage::ok(token, value)
            }
            Err(e) => {
                warn!(kind = %envelope.kind, %token, error = %e, "operation failed");
                InboundMessage::err(token, e.to_string())
            }
        };

        if let Err(e) = self.sink.deliver(reply) {
            warn!(error = %e, "failed to deliver reply");
        }
    }

    /// Run an allowlisted operation and return its reply value.
    fn execute(&self, envelope: &OutboundEnvelope) -> Result<Value, EndpointError> {
        match envelope.kind.as_str() {
            ops::GAME_SETTINGS_LIST => encode(self.store.load().list_items()),
            ops::SET_GAME_SETTINGS_NAME => {
                let p: RenamePayload = decode(&envelope.payload)?;
                self.rename(p.index, p.name)?;
                Ok(Value::Null)
            }
            ops::SAVE_MEMORY_TO_FILE => {
                let p: IndexPayload = decode(&envelope.payload)?;
                self.save(p.index)?;
                Ok(Value::Null)
            }
            ops::LOAD_MEMORY_FROM_FILE => {
                let p: IndexPayload = decode(&envelope.payload)?;
                self.load(p.index)?;
                Ok(Value::Null)
            }
            ops::OPEN_EXTERNAL_LINK => {
                let p: UrlPayload = decode(&envelope.payload)?;
                self.open_link(&p.url)?;
                Ok(Value::Null)
            }
            ops::INIT => encode(InitInfo {
                url: self.external_url.clone(),
                game_settings_list: self.store.load().list_items(),
            }),
            other => Err(EndpointError::UnknownOperation(other.to_string())),
        }
    }

    fn rename(&self, index: usize, name: String) -> Result<(), EndpointError> {
        let _guard = self.store_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.store.load();
        let slot = file
            .game_settings_list
            .get_mut(index)
            .ok_or(EndpointError::IndexOutOfRange(index))?;
        info!(index, name = %name, "renaming slot");
        slot.name = name;
        self.store.save(&file)?;
        Ok(())
    }

    fn save(&self, index: usize) -> Result<(), EndpointError> {
        let settings = self.process.read_settings()?;
        let _guard = self.store_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.store.load();
        let slot = file
            .game_settings_list
            .get_mut(index)
            .ok_or(EndpointError::IndexOutOfRange(index))?;
        slot.game_settings = Some(settings);
        self.store.save(&file)?;
        info!(index, "game settings saved to slot");
        Ok(())
    }

    fn load(&self, index: usize) -> Result<(), EndpointError> {
        let file = self.store.load();
        let slot = file
            .game_settings_list
            .get(index)
            .ok_or(EndpointError::IndexOutOfRange(index))?;
        let settings = slot.game_settings.as_ref().ok_or(EndpointError::NoData)?;
        self.process.write_settings(settings)?;
        info!(index, "game settings loaded from slot");
        Ok(())
    }

    fn open_link(&self, url: &str) -> Result<(), EndpointError> {
        if !is_openable(url) {
            return Err(EndpointError::UnsupportedUrl(url.to_string()));
        }
        info!(url, "opening external link");
        self.opener
            .open(url)
            .map_err(|e| EndpointError::OpenFailed(e.to_string()))
    }
}

fn decode<T: DeserializeOwned>(payload: &Value) -> Result<T, EndpointError> {
    T::deserialize(payload).map_err(|e| EndpointError::InvalidPayload(e.to_string()))
}

fn encode<T: Serialize>(value: T) -> Result<Value, EndpointError> {
    serde_json::to_value(value).map_err(|e| EndpointError::Encode(e.to_string()))
}
