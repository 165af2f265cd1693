//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::{load_config, DecoderConfig};
use crate::decode::YamlDecoder;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::types::{JsonValue, CONTENT_TYPE, CONTENT_TYPE_YAML};
use bytes::Bytes;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let registry = self.registry()?;

        match &self.cli.command {
            Commands::Decode {
                content_type,
                input,
                compact,
            } => {
                let body = read_input(input.as_deref())?;
                let value = decode_value(&registry, content_type, body)?;
                let output = if *compact {
                    serde_json::to_string(&value)
                } else {
                    serde_json::to_string_pretty(&value)
                }
                .map_err(|e| Error::Other(format!("Failed to render output: {e}")))?;
                println!("{output}");
                Ok(())
            }
            Commands::Types => {
                for content_type in registry.content_types() {
                    println!("{content_type}");
                }
                Ok(())
            }
        }
    }

    /// Build the registry from the configured limits
    fn registry(&self) -> Result<Registry> {
        let config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => DecoderConfig::default(),
        };
        debug!(?config, "Decoder limits");
        Ok(cli_registry(config))
    }
}

/// Registry used by the CLI: the built-ins plus YAML
pub(crate) fn cli_registry(config: DecoderConfig) -> Registry {
    let registry = Registry::with_config(config);
    registry.register(CONTENT_TYPE_YAML, YamlDecoder::new());
    registry.register("application/x-yaml", YamlDecoder::new());
    registry
}

/// Decode `body` as `content_type` into a JSON value
pub(crate) fn decode_value(
    registry: &Registry,
    content_type: &str,
    body: impl Into<Bytes>,
) -> Result<JsonValue> {
    let mut request = http::Request::builder()
        .method("POST")
        .header(CONTENT_TYPE, content_type)
        .body(body.into())
        .map_err(|e| Error::malformed_content_type(content_type, e.to_string()))?;

    let mut value = JsonValue::Null;
    registry.decode(&mut request, &mut value)?;
    Ok(value)
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Reading body");
            Ok(fs::read(path)?)
        }
        None => {
            let mut body = Vec::new();
            std::io::stdin().read_to_end(&mut body)?;
            Ok(body)
        }
    }
}
