pub mod errors;
pub mod id;
pub mod protocol;
pub mod types;

pub use errors::{BridgeError, ConfigError, HostError, MemslotError, StorageError};
pub use id::{new_call_token, CallToken};
pub use protocol::{ops, InboundMessage, OutboundEnvelope};
pub use types::{InitInfo, ProcessStatus, SettingsListItem, SettingsState};

pub type Result<T> = std::result::Result<T, MemslotError>;
