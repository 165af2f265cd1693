//! Error types for body-dispatch
//!
//! Every public API returns `Result<T, Error>`. Decoder failures are kept as
//! the parser's own error type so callers can tell a malformed JSON payload
//! from a broken multipart stream.

use thiserror::Error;

/// The main error type for body-dispatch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Content Negotiation Errors
    // ============================================================================
    /// Content-Type header missing, empty or not a media type
    #[error("Malformed content type '{header}': {message}")]
    MalformedContentType {
        /// Raw header value
        header: String,
        /// Why it was rejected
        message: String,
    },

    /// No decoder registered for the media type
    #[error("Unsupported content type: {content_type}")]
    UnsupportedContentType {
        /// Normalized media type
        content_type: String,
    },

    // ============================================================================
    // Decode Errors
    // ============================================================================
    /// Malformed JSON body
    #[error("Failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed XML body
    #[error("Failed to decode XML: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// Malformed YAML body
    #[error("Failed to decode YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Form fields did not fit the target
    #[error("Failed to bind form values: {0}")]
    Form(#[from] serde::de::value::Error),

    /// Broken multipart stream or missing boundary
    #[error("Failed to parse multipart body: {0}")]
    Multipart(#[from] multer::Error),

    /// Any other decode failure
    #[error("Failed to decode body: {message}")]
    Decode {
        /// Error message
        message: String,
    },

    /// Spill file I/O
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Validation Errors
    // ============================================================================
    /// The decoded target rejected itself
    #[error("Validation failed: {0}")]
    Validation(anyhow::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Content-Type header missing or not a media type
    MalformedContentType,
    /// No decoder registered for the content type
    UnsupportedContentType,
    /// The selected decoder could not parse the body
    Decode,
    /// The target rejected the decoded value
    Validation,
    /// Invalid configuration
    Config,
    /// Anything else
    Other,
}

impl Error {
    /// Create a malformed content type error
    pub fn malformed_content_type(header: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedContentType {
            header: header.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported content type error
    pub fn unsupported(content_type: impl Into<String>) -> Self {
        Self::UnsupportedContentType {
            content_type: content_type.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(error: impl Into<anyhow::Error>) -> Self {
        Self::Validation(error.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedContentType { .. } => ErrorKind::MalformedContentType,
            Error::UnsupportedContentType { .. } => ErrorKind::UnsupportedContentType,
            Error::Json(_)
            | Error::Xml(_)
            | Error::Yaml(_)
            | Error::Form(_)
            | Error::Multipart(_)
            | Error::Decode { .. }
            | Error::Io(_) => ErrorKind::Decode,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config { .. } => ErrorKind::Config,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if the body itself failed to decode
    pub fn is_decode_error(&self) -> bool {
        self.kind() == ErrorKind::Decode
    }

    /// Check if the decoded value failed validation
    pub fn is_validation_error(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

/// Result type alias for body-dispatch
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unsupported("text/csv");
        assert_eq!(err.to_string(), "Unsupported content type: text/csv");

        let err = Error::malformed_content_type("", "mime type must not be empty");
        assert_eq!(
            err.to_string(),
            "Malformed content type '': mime type must not be empty"
        );

        let err = Error::validation(anyhow::anyhow!("username is required"));
        assert_eq!(err.to_string(), "Validation failed: username is required");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::malformed_content_type("x", "y").kind(),
            ErrorKind::MalformedContentType
        );
        assert_eq!(
            Error::unsupported("text/csv").kind(),
            ErrorKind::UnsupportedContentType
        );
        assert_eq!(Error::config("bad").kind(), ErrorKind::Config);
        assert_eq!(Error::Other("x".into()).kind(), ErrorKind::Other);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(Error::from(json_err).is_decode_error());
        assert!(Error::decode("truncated").is_decode_error());
        assert!(Error::validation(anyhow::anyhow!("nope")).is_validation_error());
        assert!(!Error::unsupported("text/csv").is_decode_error());
    }
}
