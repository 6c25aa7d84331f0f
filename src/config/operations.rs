//! Config file loading and validation.

use super::model::ConfigFile;
use crate::error::{Result, SweepError};
use std::path::Path;

impl ConfigFile {
    /// Load a config file from YAML.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigFile)` - Successfully loaded and validated config
    /// * `Err(SweepError::InvalidConfiguration)` - Read, parse or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SweepError::InvalidConfiguration(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse a config file from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to `null`; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ConfigFile = serde_yaml::from_str(yaml).map_err(|e| {
            SweepError::InvalidConfiguration(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `owner` and `computer`, when present, must be non-empty
    /// - `log`, when present, must be a non-empty path
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("owner", &self.owner), ("computer", &self.computer)] {
            if let Some(value) = value
                && value.trim().is_empty()
            {
                return Err(SweepError::InvalidConfiguration(format!(
                    "config validation failed: {} must not be empty",
                    field
                )));
            }
        }

        if let Some(log) = &self.log
            && log.as_os_str().is_empty()
        {
            return Err(SweepError::InvalidConfiguration(
                "config validation failed: log must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
