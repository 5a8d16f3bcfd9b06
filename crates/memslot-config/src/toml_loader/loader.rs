//! Reading and parsing the config file.

use std::io;
use std::path::Path;

use memslot_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::MemslotConfig;
use crate::validation;

/// File contents, or `None` when there is no file at `path`. Any other read
/// failure (permissions, invalid UTF-8) is an error.
fn read_config(path: &Path) -> Result<Option<String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ParseError(format!(
            "cannot read {}: {e}",
            path.display()
        ))),
    }
}

fn parse_config(path: &Path, content: &str) -> Result<MemslotConfig, ConfigError> {
    let config: MemslotConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "{e}; keeping the values as written");
    }
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load an existing config file. Missing fields take their defaults and
/// out-of-range values are only warned about.
pub fn load_from_path(path: &Path) -> Result<MemslotConfig, ConfigError> {
    match read_config(path)? {
        Some(content) => parse_config(path, &content),
        None => Err(ConfigError::FileNotFound(path.to_path_buf())),
    }
}

/// Load `path`, or write the template there and return defaults when no
/// file exists. An existing file is never rewritten, even if unreadable.
pub fn load_or_create(path: &Path) -> Result<MemslotConfig, ConfigError> {
    match read_config(path)? {
        Some(content) => parse_config(path, &content),
        None => {
            info!(path = %path.display(), "no config file, using defaults");
            create_default_config(path)?;
            Ok(MemslotConfig::default())
        }
    }
}

/// [`load_or_create`] at the platform default location.
pub fn load_default() -> Result<MemslotConfig, ConfigError> {
    load_or_create(&default_config_path()?)
}
