//! Request body decoder module
//!
//! Supports: urlencoded forms, multipart forms, JSON, XML, YAML
//!
//! # Overview
//!
//! A [`Decoder`] parses the body of one content type and hands the result
//! to the target through [`Populate`]. Decoders are plain strategies; which
//! one runs for a request is decided by the [`Registry`](crate::Registry).

mod decoders;
mod types;

pub use decoders::{FormDecoder, JsonDecoder, MultipartDecoder, XmlDecoder, YamlDecoder};
pub use types::{Decoder, Populate, Source, Validate};

#[cfg(test)]
mod tests;
