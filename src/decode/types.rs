//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::{Error, Result};
use crate::form::FormValues;
use crate::types::Request;
use serde::de::DeserializeOwned;

/// Body content handed from a decoder to its target
///
/// Each variant is deserialized with its own format's rules, so typed
/// fields (numbers, booleans) bind from text formats as well.
#[derive(Debug)]
pub enum Source<'a> {
    /// Raw JSON document
    Json(&'a [u8]),
    /// Raw XML document
    Xml(&'a [u8]),
    /// Raw YAML document
    Yaml(&'a [u8]),
    /// Parsed form fields
    Form(&'a FormValues),
    /// Already parsed value, for decoders that do their own parsing
    Value(serde_json::Value),
}

/// A value a decoder can write into
///
/// Implemented for every `DeserializeOwned` type. The target is replaced
/// only when deserialization succeeds; on error it is left as it was.
pub trait Populate {
    /// Deserialize `source` into `self`
    fn populate(&mut self, source: Source<'_>) -> Result<()>;
}

impl<T: DeserializeOwned> Populate for T {
    fn populate(&mut self, source: Source<'_>) -> Result<()> {
        let value = match source {
            Source::Json(body) => serde_json::from_slice(body)?,
            Source::Xml(body) => {
                let text = std::str::from_utf8(body)
                    .map_err(|e| Error::decode(format!("XML body is not valid UTF-8: {e}")))?;
                quick_xml::de::from_str(text)?
            }
            Source::Yaml(body) => serde_yaml::from_slice(body)?,
            Source::Form(values) => values.bind()?,
            Source::Value(value) => serde_json::from_value(value)?,
        };
        *self = value;
        Ok(())
    }
}

/// Post-decode self check
///
/// The dispatcher calls `validate` once after every successful decode.
/// The default accepts everything, so targets without rules only need an
/// empty `impl Validate for T {}`.
pub trait Validate {
    /// Check the decoded value
    fn validate(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl Validate for serde_json::Value {}

impl<T: Validate> Validate for Box<T> {
    fn validate(&self) -> anyhow::Result<()> {
        (**self).validate()
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> anyhow::Result<()> {
        self.as_ref().map_or(Ok(()), Validate::validate)
    }
}

/// Decodes a request body of one content type into a target
///
/// Closures with the same signature are decoders too:
///
/// ```ignore
/// registry.register("text/plain", |req: &mut Request, target: &mut dyn Populate| {
///     let text = String::from_utf8_lossy(req.body()).into_owned();
///     target.populate(Source::Value(text.into()))
/// });
/// ```
pub trait Decoder: Send + Sync {
    /// Decode the request body into the target
    fn decode(&self, request: &mut Request, target: &mut dyn Populate) -> Result<()>;
}

impl<F> Decoder for F
where
    F: Fn(&mut Request, &mut dyn Populate) -> Result<()> + Send + Sync,
{
    fn decode(&self, request: &mut Request, target: &mut dyn Populate) -> Result<()> {
        self(request, target)
    }
}
