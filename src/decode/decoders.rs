//! Decoder implementations
//!
//! Each decoder handles a specific request body format.

use super::types::{Decoder, Populate, Source};
use crate::config::DecoderConfig;
use crate::content_type;
use crate::error::{Error, Result};
use crate::form::{multipart, FormValues, MultipartForm, MultipartLimits};
use crate::types::{Request, DEFAULT_MAX_FORM_SIZE, DEFAULT_MAX_MEMORY};
use std::path::PathBuf;
use tracing::{debug, trace};

// ============================================================================
// Urlencoded Form Decoder
// ============================================================================

/// `application/x-www-form-urlencoded` decoder
///
/// Takes the body, leaving the parsed [`FormValues`] in the request
/// extensions. Values already present there are reused without touching
/// the body.
///
/// The target is rebuilt from the submitted fields, so a key missing from
/// the body fails the decode unless its field is an `Option` or the target
/// carries `#[serde(default)]`. Repeated keys fill `Vec` fields.
#[derive(Debug, Clone)]
pub struct FormDecoder {
    /// Largest accepted body
    max_size: u64,
}

impl Default for FormDecoder {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_FORM_SIZE,
        }
    }
}

impl FormDecoder {
    /// Create a new form decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form decoder with a body size limit
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    fn parse(&self, request: &mut Request) -> Result<FormValues> {
        if let Some(values) = request.extensions().get::<FormValues>() {
            return Ok(values.clone());
        }

        let size = request.body().len() as u64;
        if size > self.max_size {
            return Err(Error::decode(format!(
                "form body of {size} bytes exceeds limit of {} bytes",
                self.max_size
            )));
        }

        let values = FormValues::parse(request.body())?;
        drop(std::mem::take(request.body_mut()));
        request.extensions_mut().insert(values.clone());
        Ok(values)
    }
}

impl Decoder for FormDecoder {
    fn decode(&self, request: &mut Request, target: &mut dyn Populate) -> Result<()> {
        let values = self.parse(request)?;
        trace!(fields = values.len(), "Parsed urlencoded form");
        target.populate(Source::Form(&values))
    }
}

// ============================================================================
// Multipart Form Decoder
// ============================================================================

/// `multipart/form-data` decoder
///
/// Binds the text parts onto the target. The whole [`MultipartForm`],
/// file parts included, is left in the request extensions.
#[derive(Debug, Clone)]
pub struct MultipartDecoder {
    limits: MultipartLimits,
}

impl Default for MultipartDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MEMORY)
    }
}

impl MultipartDecoder {
    /// Create a multipart decoder keeping up to `max_memory` bytes in memory
    pub fn new(max_memory: u64) -> Self {
        Self {
            limits: MultipartLimits {
                max_memory,
                temp_dir: None,
            },
        }
    }

    /// Create a multipart decoder from configuration
    pub fn from_config(config: &DecoderConfig) -> Self {
        Self {
            limits: MultipartLimits {
                max_memory: config.max_memory,
                temp_dir: config.temp_dir.clone(),
            },
        }
    }

    /// Write spilled files into `dir`
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.limits.temp_dir = Some(dir.into());
        self
    }

    /// In-memory threshold in bytes
    pub fn max_memory(&self) -> u64 {
        self.limits.max_memory
    }

    fn parse(&self, request: &mut Request) -> Result<MultipartForm> {
        if let Some(form) = request.extensions().get::<MultipartForm>() {
            return Ok(form.clone());
        }

        let boundary = content_type::boundary(request.headers())?;
        let body = std::mem::take(request.body_mut());
        let form = multipart::parse(body, boundary, &self.limits)?;
        request.extensions_mut().insert(form.clone());
        Ok(form)
    }
}

impl Decoder for MultipartDecoder {
    fn decode(&self, request: &mut Request, target: &mut dyn Populate) -> Result<()> {
        let form = self.parse(request)?;
        debug!(
            fields = form.values.len(),
            files = form.files.len(),
            "Parsed multipart form"
        );
        target.populate(Source::Form(&form.values))
    }
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// `application/json` decoder
///
/// Reads the body in place; it stays readable afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for JsonDecoder {
    fn decode(&self, request: &mut Request, target: &mut dyn Populate) -> Result<()> {
        target.populate(Source::Json(request.body()))
    }
}

// ============================================================================
// XML Decoder
// ============================================================================

/// `application/xml` decoder
///
/// Reads the body in place; it stays readable afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

impl XmlDecoder {
    /// Create a new XML decoder
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for XmlDecoder {
    fn decode(&self, request: &mut Request, target: &mut dyn Populate) -> Result<()> {
        target.populate(Source::Xml(request.body()))
    }
}

// ============================================================================
// YAML Decoder
// ============================================================================

/// YAML decoder, for `application/yaml` or `application/x-yaml`
///
/// Not registered by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDecoder;

impl YamlDecoder {
    /// Create a new YAML decoder
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for YamlDecoder {
    fn decode(&self, request: &mut Request, target: &mut dyn Populate) -> Result<()> {
        target.populate(Source::Yaml(request.body()))
    }
}
