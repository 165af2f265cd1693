//! Decoder registry and dispatch

use crate::config::DecoderConfig;
use crate::content_type;
use crate::decode::{Decoder, FormDecoder, JsonDecoder, MultipartDecoder, Validate, XmlDecoder};
use crate::error::{Error, Result};
use crate::types::{
    Request, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, CONTENT_TYPE_MULTIPART_FORM, CONTENT_TYPE_XML,
};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Mapping from content type to decoder
///
/// Keys are normalized media types (`type/subtype`, lowercase, no
/// parameters). Registration and lookup may happen concurrently; lookups
/// take a read lock and never hold it while a decoder runs.
pub struct Registry {
    decoders: RwLock<HashMap<String, Arc<dyn Decoder>>>,
    config: DecoderConfig,
}

impl Registry {
    /// Create a registry with the built-in decoders
    ///
    /// | Content type | Decoder |
    /// |---|---|
    /// | `application/x-www-form-urlencoded` | [`FormDecoder`] |
    /// | `multipart/form-data` | [`MultipartDecoder`] (10 MiB in memory) |
    /// | `application/json` | [`JsonDecoder`] |
    /// | `application/xml` | [`XmlDecoder`] |
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    /// Create a registry with built-in decoders using the given limits
    pub fn with_config(config: DecoderConfig) -> Self {
        let registry = Self {
            decoders: RwLock::new(HashMap::new()),
            config,
        };

        registry.register(
            CONTENT_TYPE_FORM,
            FormDecoder::with_max_size(registry.config.max_form_size),
        );
        registry.register(
            CONTENT_TYPE_MULTIPART_FORM,
            MultipartDecoder::from_config(&registry.config),
        );
        registry.register(CONTENT_TYPE_JSON, JsonDecoder::new());
        registry.register(CONTENT_TYPE_XML, XmlDecoder::new());
        registry
    }

    /// Create a registry without any decoders
    pub fn empty() -> Self {
        Self {
            decoders: RwLock::new(HashMap::new()),
            config: DecoderConfig::default(),
        }
    }

    /// Limits this registry was built with
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Register a decoder for a content type, replacing any previous one
    ///
    /// Returns the replaced decoder.
    pub fn register<D>(&self, content_type: &str, decoder: D) -> Option<Arc<dyn Decoder>>
    where
        D: Decoder + 'static,
    {
        self.register_shared(content_type, Arc::new(decoder))
    }

    /// Register an already shared decoder
    pub fn register_shared(
        &self,
        content_type: &str,
        decoder: Arc<dyn Decoder>,
    ) -> Option<Arc<dyn Decoder>> {
        let key = content_type::normalize(content_type);
        let previous = self.decoders.write().insert(key.clone(), decoder);
        if previous.is_some() {
            debug!(content_type = %key, "Replaced decoder");
        } else {
            trace!(content_type = %key, "Registered decoder");
        }
        previous
    }

    /// Remove the decoder for a content type
    pub fn unregister(&self, content_type: &str) -> Option<Arc<dyn Decoder>> {
        let key = content_type::normalize(content_type);
        self.decoders.write().remove(&key)
    }

    /// Find the decoder for a content type
    pub fn lookup(&self, content_type: &str) -> Option<Arc<dyn Decoder>> {
        let key = content_type::normalize(content_type);
        self.decoders.read().get(&key).cloned()
    }

    /// Check whether a content type has a decoder
    pub fn contains(&self, content_type: &str) -> bool {
        self.lookup(content_type).is_some()
    }

    /// Registered content types, sorted
    pub fn content_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.decoders.read().keys().cloned().collect();
        types.sort();
        types
    }

    /// Decode a request body into `target`
    ///
    /// Steps run strictly in order, each only after the previous succeeded:
    ///
    /// 1. Read the `Content-Type` header ([`Error::MalformedContentType`])
    /// 2. Select the decoder registered for it ([`Error::UnsupportedContentType`])
    /// 3. Run the decoder; its error is returned unchanged
    /// 4. Run [`Validate::validate`] on the target ([`Error::Validation`])
    ///
    /// A validation failure leaves the decoded fields in `target`.
    pub fn decode<T>(&self, request: &mut Request, target: &mut T) -> Result<()>
    where
        T: DeserializeOwned + Validate,
    {
        let content_type = content_type::parse(request.headers())?;

        let decoder = self
            .decoders
            .read()
            .get(&content_type)
            .cloned()
            .ok_or_else(|| Error::unsupported(content_type.as_str()))?;

        debug!(content_type = %content_type, "Decoding request body");
        decoder.decode(request, target)?;

        target.validate().map_err(Error::Validation)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("content_types", &self.content_types())
            .field("config", &self.config)
            .finish()
    }
}
