//! Decoder registry module
//!
//! # Overview
//!
//! The [`Registry`] maps media types to decoders and dispatches requests to
//! them. A process-wide instance backs [`crate::register`] and
//! [`crate::decode`]; separate instances keep dispatch tables isolated.

mod dispatch;

pub use dispatch::Registry;
