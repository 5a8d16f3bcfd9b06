//! Configuration schema types for memslot.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemslotConfig {
    pub bridge: BridgeConfig,
    pub host: HostConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Bridge
// =============================================================================

/// Client-side bridge settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Skip the host binding and run against the offline stand-in.
    pub offline: bool,
}

// =============================================================================
// Host
// =============================================================================

/// Settings for the host endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Number of memory slots created in a fresh store.
    pub slot_count: u32,
    /// Resource URL handed to the panel by the init call.
    pub external_url: String,
    /// Slot store location; the platform data directory when unset.
    pub data_file: Option<PathBuf>,
    /// How often the status monitor samples the process state.
    pub status_interval_ms: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            slot_count: 10,
            external_url: "https://github.com/memslot/memslot".into(),
            data_file: None,
            status_interval_ms: 500,
        }
    }
}

// =============================================================================
// Logging
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "memslot=info".into(),
        }
    }
}
