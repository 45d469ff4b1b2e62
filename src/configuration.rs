use std::path::Path;

use key_rotation::{KeyRotationConfig, KeyRotationError};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub key_rotation: KeyRotationConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] KeyRotationError),
}

impl CliConfig {
    /// Read and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path.as_ref())?;
        let config: CliConfig = serde_yaml::from_str(&config_str)?;
        config.key_rotation.validate()?;
        log::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_deserialize_config() {
        let json_data = r#"
        {
            "key_rotation": {
                "default_tolerance_minutes": 5,
                "max_tolerance_minutes": 60
            }
        }
        "#;

        let config: CliConfig = serde_json::from_str(json_data).expect("Failed to deserialize config");

        assert_eq!(config.key_rotation.default_tolerance_minutes, 5);
        assert_eq!(config.key_rotation.max_tolerance_minutes, Some(60));
    }

    #[test]
    fn test_load_yaml() {
        let file = write_config("key_rotation:\n  default_tolerance_minutes: 10\n");
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.key_rotation.default_tolerance_minutes, 10);
        assert_eq!(config.key_rotation.max_tolerance_minutes, None);
    }

    #[test]
    fn test_load_empty_section_uses_defaults() {
        let file = write_config("{}\n");
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.key_rotation, KeyRotationConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let file = write_config(
            "key_rotation:\n  default_tolerance_minutes: 90\n  max_tolerance_minutes: 60\n",
        );
        assert!(matches!(
            CliConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let file = write_config("key_rotation: [not, a, map\n");
        assert!(matches!(
            CliConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            CliConfig::load("/nonexistent/keyrotation.yaml"),
            Err(ConfigError::Read(_))
        ));
    }
}
