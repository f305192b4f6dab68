//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::HostConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `listener.bind_address`.
pub const BIND_ENV: &str = "HELLO_SILO_BIND";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<HostConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<HostConfig, ConfigError> {
    let config: HostConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Resolve the effective configuration: file (or defaults), then environment.
pub fn resolve_config(path: Option<&Path>) -> Result<HostConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => HostConfig::default(),
    };

    if let Ok(bind) = std::env::var(BIND_ENV) {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_invalid_values() {
        let err = parse_config("[silo]\nmailbox_capacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert_eq!(
            err.to_string(),
            "Validation failed: silo.mailbox_capacity must be greater than zero"
        );
    }

    #[test]
    fn parse_rejects_bad_toml() {
        let err = parse_config("[listener\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn sample_config_is_valid() {
        let config = parse_config(include_str!("../../hello-silo.toml")).unwrap();
        assert_eq!(config.silo.service_id, "HelloWorldApp");
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
    }

    // The only test in the crate that touches BIND_ENV, so it cannot race.
    #[test]
    fn bind_env_overrides_and_is_validated() {
        std::env::set_var(BIND_ENV, "127.0.0.1:7777");
        let config = resolve_config(None);
        std::env::set_var(BIND_ENV, "bogus");
        let bogus = resolve_config(None);
        std::env::remove_var(BIND_ENV);

        assert_eq!(config.unwrap().listener.bind_address, "127.0.0.1:7777");
        let err = bogus.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: listener.bind_address 'bogus' is not a socket address"
        );

        let config = resolve_config(None).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:5000");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("hello-silo-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[listener]\nbind_address = \"127.0.0.1:6100\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:6100");

        fs::remove_file(&path).unwrap();
    }
}
