//! Form bodies
//!
//! Supports: `application/x-www-form-urlencoded`, `multipart/form-data`
//!
//! # Overview
//!
//! Both form decoders reduce a body to [`FormValues`] (name to every
//! submitted value) and bind them onto the target through a serde
//! deserializer that hands repeated keys to sequence fields.
//! The parsed values are left in the request extensions because parsing
//! consumes the body.

mod de;
pub mod multipart;
mod values;

pub use multipart::{FileContents, FilePart, MultipartForm, MultipartLimits};
pub use values::FormValues;
