//! memslot configuration.
//!
//! TOML-based configuration for the bridge, the host endpoint, and logging.
//! Every section uses serde defaults so partial configs work out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{BridgeConfig, HostConfig, LoggingConfig, MemslotConfig};

use memslot_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it when missing.
pub fn load_config() -> Result<MemslotConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<MemslotConfig, ConfigError> {
    toml_loader::load_from_path(path)
}
