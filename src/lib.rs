// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # body-dispatch
//!
//! Content-type driven request body decoding.
//!
//! A request's `Content-Type` header selects a decoder from a registry; the
//! decoder parses the body into a caller supplied value, and the value gets
//! a chance to validate itself afterwards.
//!
//! ## Features
//!
//! - **Built-in decoders**: urlencoded forms, multipart forms, JSON, XML
//! - **Pluggable**: register or replace decoders per media type at any time
//! - **Validation hook**: [`Validate`] runs after every successful decode
//! - **axum integration**: [`extract::Decoded`] extractor
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use body_dispatch::{Registry, Validate};
//! use serde::Deserialize;
//!
//! #[derive(Default, Deserialize)]
//! struct Login {
//!     username: String,
//!     password: String,
//! }
//!
//! impl Validate for Login {}
//!
//! let registry = Registry::new();
//! let mut login = Login::default();
//! registry.decode(&mut request, &mut login)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! request ──► Content-Type ──► Registry lookup ──► Decoder ──► Validate
//!              (mime)           (RwLock map)       │
//!                                 ┌────────────────┼──────────────┬────────────┐
//!                                 ▼                ▼              ▼            ▼
//!                             urlencoded       multipart        JSON          XML
//!                            (FormValues)       (multer)    (serde_json)  (quick-xml)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Content type constants and shared aliases
pub mod types;

/// Content-Type header parsing
pub mod content_type;

/// Decoder configuration
pub mod config;

/// Form values and multipart parsing
pub mod form;

/// Decoder trait and built-in decoders
pub mod decode;

/// Decoder registry and dispatch
pub mod registry;

/// axum extractors
pub mod extract;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_config, load_config_from_str, DecoderConfig};
pub use decode::{
    Decoder, FormDecoder, JsonDecoder, MultipartDecoder, Populate, Source, Validate, XmlDecoder,
    YamlDecoder,
};
pub use error::{Error, ErrorKind, Result};
pub use form::{FormValues, MultipartForm};
pub use registry::Registry;
pub use types::*;

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Process-wide registry behind [`register`] and [`decode`]
static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// The process-wide registry, created with the built-in decoders on first use
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

/// Register a decoder in the process-wide registry
///
/// Returns the decoder previously registered for the content type.
pub fn register<D>(content_type: &str, decoder: D) -> Option<Arc<dyn Decoder>>
where
    D: Decoder + 'static,
{
    DEFAULT_REGISTRY.register(content_type, decoder)
}

/// Decode a request body into `target` using the process-wide registry
pub fn decode<T>(request: &mut Request, target: &mut T) -> Result<()>
where
    T: DeserializeOwned + Validate,
{
    DEFAULT_REGISTRY.decode(request, target)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
