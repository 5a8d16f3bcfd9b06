//! Wire protocol between the panel and the host.
//!
//! Messages flow in both directions:
//! - **Panel -> host**: one [`OutboundEnvelope`] per call, serialized to a
//!   single JSON string and handed to the host's synchronous entry point.
//! - **Host -> panel**: [`InboundMessage`]s through one fixed entry point,
//!   either a reply carrying the call's token or an unsolicited status push.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::CallToken;
use crate::types::ProcessStatus;

/// Operation names understood by the host.
pub mod ops {
    pub const GAME_SETTINGS_LIST: &str = "game_settings_list";
    pub const SET_GAME_SETTINGS_NAME: &str = "set_game_settings_name";
    pub const SAVE_MEMORY_TO_FILE: &str = "save_memory_to_file";
    pub const LOAD_MEMORY_FROM_FILE: &str = "load_memory_from_file";
    pub const OPEN_EXTERNAL_LINK: &str = "open_external_link";
    pub const INIT: &str = "init";

    pub const ALL: &[&str] = &[
        GAME_SETTINGS_LIST,
        SET_GAME_SETTINGS_NAME,
        SAVE_MEMORY_TO_FILE,
        LOAD_MEMORY_FROM_FILE,
        OPEN_EXTERNAL_LINK,
        INIT,
    ];

    pub fn is_known(kind: &str) -> bool {
        ALL.contains(&kind)
    }
}

/// A single outbound call: `{ "type", "callback", "payload" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundEnvelope {
    /// Operation name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Token the host must echo back with its reply.
    pub callback: CallToken,
    #[serde(default)]
    pub payload: Value,
}

impl OutboundEnvelope {
    pub fn new(kind: impl Into<String>, callback: CallToken, payload: Value) -> Self {
        Self {
            kind: kind.into(),
            callback,
            payload,
        }
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A host-originated message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InboundMessage {
    /// Completion of one outbound call. A non-null `error` means failure.
    Reply {
        token: CallToken,
        #[serde(default)]
        error: Option<Value>,
        #[serde(default)]
        value: Option<Value>,
    },
    /// Unsolicited status push.
    Status { status: ProcessStatus },
}

impl InboundMessage {
    pub fn ok(token: CallToken, value: Value) -> Self {
        Self::Reply {
            token,
            error: None,
            value: Some(value),
        }
    }

    pub fn err(token: CallToken, error: impl Into<Value>) -> Self {
        Self::Reply {
            token,
            error: Some(error.into()),
            value: None,
        }
    }

    pub fn status(status: ProcessStatus) -> Self {
        Self::Status { status }
    }

    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
