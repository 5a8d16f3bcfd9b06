//! Configuration validation.
//!
//! Checks numeric ranges and the external URL scheme, collecting every
//! problem into one error.

use crate::schema::MemslotConfig;
use memslot_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &MemslotConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(&mut errors, "host.slot_count", config.host.slot_count as u64, 1, 64);
    validate_range(
        &mut errors,
        "host.status_interval_ms",
        config.host.status_interval_ms,
        10,
        60_000,
    );

    let url = config.host.external_url.as_str();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        errors.push(format!("host.external_url = {url:?} must be an http(s) URL"));
    }

    if config.logging.level.trim().is_empty() {
        errors.push("logging.level must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Push an error if `value` is outside `[min, max]`.
fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&MemslotConfig::default()).is_ok());
    }

    #[test]
    fn slot_count_out_of_range() {
        let mut config = MemslotConfig::default();
        config.host.slot_count = 0;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("host.slot_count = 0"));

        config.host.slot_count = 65;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn status_interval_out_of_range() {
        let mut config = MemslotConfig::default();
        config.host.status_interval_ms = 5;
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("host.status_interval_ms"));
    }

    #[test]
    fn external_url_must_be_http() {
        let mut config = MemslotConfig::default();
        config.host.external_url = "file:///etc/passwd".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("host.external_url"));
    }

    #[test]
    fn collects_every_error() {
        let mut config = MemslotConfig::default();
        config.host.slot_count = 0;
        config.logging.level = "  ".into();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("host.slot_count"));
        assert!(err.contains("logging.level"));
    }
}
