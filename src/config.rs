//! Decoder configuration
//!
//! Limits and spill settings for the built-in decoders. Configuration can be
//! built in code or loaded from YAML:
//!
//! ```yaml
//! max_memory: 1048576
//! max_form_size: 65536
//! temp_dir: /var/tmp/uploads
//! ```

use crate::error::{Error, Result};
use crate::types::{DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_FORM_SIZE, DEFAULT_MAX_MEMORY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for the built-in decoders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Multipart bytes kept in memory before file parts spill to disk
    pub max_memory: u64,

    /// Largest accepted urlencoded body
    pub max_form_size: u64,

    /// Largest body buffered from a streaming request (axum extractor)
    pub max_body_size: usize,

    /// Directory for spilled multipart files (system temp dir when unset)
    pub temp_dir: Option<PathBuf>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_memory: DEFAULT_MAX_MEMORY,
            max_form_size: DEFAULT_MAX_FORM_SIZE,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            temp_dir: None,
        }
    }
}

impl DecoderConfig {
    /// Create a new config builder
    pub fn builder() -> DecoderConfigBuilder {
        DecoderConfigBuilder::default()
    }

    /// Check that every limit is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_memory == 0 {
            return Err(Error::config("max_memory must be greater than zero"));
        }
        if self.max_form_size == 0 {
            return Err(Error::config("max_form_size must be greater than zero"));
        }
        if self.max_body_size == 0 {
            return Err(Error::config("max_body_size must be greater than zero"));
        }
        Ok(())
    }
}

/// Builder for decoder config
#[derive(Default)]
pub struct DecoderConfigBuilder {
    config: DecoderConfig,
}

impl DecoderConfigBuilder {
    /// Set the multipart in-memory threshold
    pub fn max_memory(mut self, bytes: u64) -> Self {
        self.config.max_memory = bytes;
        self
    }

    /// Set the urlencoded body limit
    pub fn max_form_size(mut self, bytes: u64) -> Self {
        self.config.max_form_size = bytes;
        self
    }

    /// Set the buffered body limit
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.config.max_body_size = bytes;
        self
    }

    /// Set the spill directory
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    /// Build the config
    pub fn build(self) -> DecoderConfig {
        self.config
    }
}

/// Load decoder configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<DecoderConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;
    load_config_from_str(&content)
}

/// Load decoder configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<DecoderConfig> {
    let config: DecoderConfig = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;

    config.validate()?;
    Ok(config)
}
