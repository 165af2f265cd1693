//! Content-Type extraction
//!
//! Turns a `Content-Type` header into the lowercase `type/subtype` token used
//! as the registry key. Parameters (`charset`, `boundary`, ...) are dropped.

use crate::error::{Error, Result};
use http::header::{HeaderMap, CONTENT_TYPE};
use mime::Mime;

/// Extract the media type from a request's `Content-Type` header
///
/// Fails with [`Error::MalformedContentType`] when the header is absent,
/// empty, not valid UTF-8, or not a `type/subtype` media type.
pub fn parse(headers: &HeaderMap) -> Result<String> {
    let value = headers
        .get(CONTENT_TYPE)
        .ok_or_else(|| Error::malformed_content_type("", "Content-Type header is missing"))?;

    let header = value.to_str().map_err(|e| {
        Error::malformed_content_type(String::from_utf8_lossy(value.as_bytes()), e.to_string())
    })?;

    parse_str(header)
}

/// Parse a raw header value into its lowercase `type/subtype` token
pub fn parse_str(header: &str) -> Result<String> {
    let trimmed = header.trim();
    if trimmed.is_empty() {
        return Err(Error::malformed_content_type(
            header,
            "mime type must not be empty",
        ));
    }

    let mime: Mime = trimmed
        .parse()
        .map_err(|e: mime::FromStrError| Error::malformed_content_type(header, e.to_string()))?;

    Ok(mime.essence_str().to_ascii_lowercase())
}

/// Normalize a content type for use as a registry key
///
/// Registration never fails, so values that do not parse as a media type
/// are only trimmed and lowercased.
pub fn normalize(content_type: &str) -> String {
    parse_str(content_type).unwrap_or_else(|_| content_type.trim().to_ascii_lowercase())
}

/// Read the `boundary` parameter of a multipart content type
pub fn boundary(headers: &HeaderMap) -> Result<String> {
    let header = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    multer::parse_boundary(header).map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, CONTENT_TYPE_MULTIPART_FORM, CONTENT_TYPE_XML,
    };
    use crate::ErrorKind;
    use http::HeaderValue;
    use test_case::test_case;

    fn headers(content_type: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
        headers
    }

    #[test_case("application/json", CONTENT_TYPE_JSON ; "json")]
    #[test_case("application/json; charset=utf-8", CONTENT_TYPE_JSON ; "json with charset")]
    #[test_case("application/xml", CONTENT_TYPE_XML ; "xml")]
    #[test_case("application/xml; charset=utf-8", CONTENT_TYPE_XML ; "xml with charset")]
    #[test_case("application/x-www-form-urlencoded", CONTENT_TYPE_FORM ; "form")]
    #[test_case("multipart/form-data", CONTENT_TYPE_MULTIPART_FORM ; "multipart")]
    #[test_case("multipart/form-data; boundary=xxx", CONTENT_TYPE_MULTIPART_FORM ; "multipart with boundary")]
    fn test_parse_known_types(header: &str, expected: &str) {
        assert_eq!(parse(&headers(header)).unwrap(), expected);
    }

    #[test]
    fn test_parse_lowercases() {
        assert_eq!(
            parse(&headers("Application/JSON; Charset=UTF-8")).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_parse_missing_header() {
        let err = parse(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedContentType);
    }

    #[test]
    fn test_parse_empty_header() {
        let err = parse(&headers("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedContentType);
    }

    #[test_case("json" ; "no slash")]
    #[test_case("/json" ; "empty type")]
    #[test_case(";charset=utf-8" ; "parameters only")]
    fn test_parse_invalid_media_type(header: &str) {
        let err = parse(&headers(header)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedContentType);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Application/JSON"), "application/json");
        assert_eq!(normalize("text/plain; charset=utf-8"), "text/plain");
        assert_eq!(normalize("  Content/Type  "), "content/type");
        assert_eq!(normalize("Not A Type"), "not a type");
    }

    #[test]
    fn test_boundary() {
        assert_eq!(
            boundary(&headers("multipart/form-data; boundary=xxx")).unwrap(),
            "xxx"
        );
        assert!(boundary(&headers("multipart/form-data")).is_err());
        assert!(boundary(&HeaderMap::new()).is_err());
    }
}
