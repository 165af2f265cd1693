//! Common types used throughout body-dispatch
//!
//! Content type constants, the request type decoders operate on, and the
//! default size limits.

use bytes::Bytes;

// ============================================================================
// Type Aliases
// ============================================================================

/// HTTP request with a fully buffered body
pub type Request = http::Request<Bytes>;

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Content Types
// ============================================================================

/// Name of the header that selects the decoder
pub const CONTENT_TYPE: &str = "Content-Type";

/// `application/x-www-form-urlencoded`
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// `multipart/form-data`
pub const CONTENT_TYPE_MULTIPART_FORM: &str = "multipart/form-data";

/// `application/json`
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// `application/xml`
pub const CONTENT_TYPE_XML: &str = "application/xml";

/// `application/yaml` (not registered by default)
pub const CONTENT_TYPE_YAML: &str = "application/yaml";

// ============================================================================
// Limits
// ============================================================================

/// Default multipart in-memory threshold: 10 MiB
pub const DEFAULT_MAX_MEMORY: u64 = 10 * 1024 * 1024;

/// Default urlencoded body limit: 10 MiB
pub const DEFAULT_MAX_FORM_SIZE: u64 = 10 * 1024 * 1024;

/// Default limit when buffering a streamed body: 10 MiB
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;
