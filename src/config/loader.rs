//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable selecting the CORS allowed origin.
pub const ORIGIN_ENV: &str = "ORIGIN";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
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

/// Load configuration from an optional TOML file, overlay the environment,
/// and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values onto `config`. Empty values count as unset.
pub fn apply_env_overrides<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(origin) = lookup(ORIGIN_ENV).filter(|v| !v.is_empty()) {
        config.cors.allowed_origin = origin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_origin_override() {
        let mut config = ProxyConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == ORIGIN_ENV).then(|| "https://map.example.com".to_string())
        });
        assert_eq!(config.cors.allowed_origin, "https://map.example.com");
    }

    #[test]
    fn test_empty_origin_falls_back_to_wildcard() {
        let mut config = ProxyConfig::default();
        apply_env_overrides(&mut config, |_| Some(String::new()));
        assert_eq!(config.cors.allowed_origin, "*");

        apply_env_overrides(&mut config, |_| None);
        assert_eq!(config.cors.allowed_origin, "*");
    }

    #[test]
    fn test_load_from_file_reports_validation_errors() {
        let path = std::env::temp_dir().join(format!(
            "truckersmp-proxy-config-{}.toml",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[upstream]\ntimeout_secs = 0").unwrap();
        drop(file);

        let result = load_config(Some(&path));
        let _ = fs::remove_file(&path);

        match result {
            Err(ConfigError::Validation(errors)) => {
                assert!(errors.contains(&ValidationError::ZeroTimeout));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
