use std::fmt;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// The error half of a host reply, kept as the raw JSON the host sent.
#[derive(Debug, Clone, PartialEq)]
pub struct HostError(pub serde_json::Value);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(serde_json::Value::String(message.into()))
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

impl std::error::Error for HostError {}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("host error: {0}")]
    Host(#[from] HostError),

    #[error("reply decode error: {0}")]
    Decode(String),

    #[error("payload encode error: {0}")]
    Encode(String),

    #[error("host binding error: {0}")]
    Transport(String),

    #[error("call abandoned before a reply arrived")]
    Disconnected,
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not determine data directory")]
    PathUnavailable,

    #[error("storage serialization error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum MemslotError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("host.slot_count = 0".into());
        assert_eq!(err.to_string(), "config validation error: host.slot_count = 0");
    }

    #[test]
    fn host_error_string_displays_bare() {
        let err = HostError::new("disk full");
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.value(), &serde_json::json!("disk full"));
    }

    #[test]
    fn host_error_structured_displays_json() {
        let err = HostError(serde_json::json!({"code": 7}));
        assert_eq!(err.to_string(), r#"{"code":7}"#);
    }

    #[test]
    fn bridge_error_from_host() {
        let err: BridgeError = HostError::new("disk full").into();
        assert!(matches!(err, BridgeError::Host(_)));
        assert_eq!(err.to_string(), "host error: disk full");
    }

    #[test]
    fn bridge_error_other_variants() {
        let err = BridgeError::Decode("expected a sequence".into());
        assert_eq!(err.to_string(), "reply decode error: expected a sequence");

        let err = BridgeError::Transport("channel closed".into());
        assert_eq!(err.to_string(), "host binding error: channel closed");

        assert_eq!(
            BridgeError::Disconnected.to_string(),
            "call abandoned before a reply arrived"
        );
    }

    #[test]
    fn memslot_error_from_layers() {
        let err: MemslotError = BridgeError::Disconnected.into();
        assert!(matches!(err, MemslotError::Bridge(_)));

        let err: MemslotError = StorageError::PathUnavailable.into();
        assert!(matches!(err, MemslotError::Storage(_)));
        assert_eq!(err.to_string(), "could not determine data directory");

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MemslotError = io_err.into();
        assert!(matches!(err, MemslotError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }
}
