//! Where the config file lives, and writing the first one.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use memslot_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// `<config dir>/memslot/config.toml`, e.g. `~/.config/memslot/config.toml`
/// on Linux.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("memslot").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented template to `path`.
///
/// Never replaces a file that already exists: if one appeared in the
/// meantime it is left alone and `Ok(false)` is returned.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    let io_err = |what: &str, e: io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err("create directory for", e))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(io_err("create", e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_err("write", e))?;

    info!(path = %path.display(), "wrote default config");
    Ok(true)
}
