//! Tests for decoder module

use super::*;
use crate::form::{FormValues, MultipartForm};
use crate::types::{Request, CONTENT_TYPE_JSON, CONTENT_TYPE_MULTIPART_FORM};
use crate::Error;
use bytes::Bytes;
use serde::Deserialize;

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
struct Login {
    username: String,
    password: String,
}

fn request(content_type: &str, body: &'static str) -> Request {
    http::Request::builder()
        .method("POST")
        .uri("/login")
        .header("Content-Type", content_type)
        .body(Bytes::from_static(body.as_bytes()))
        .unwrap()
}

fn login(username: &str, password: &str) -> Login {
    Login {
        username: username.to_string(),
        password: password.to_string(),
    }
}

// ============================================================================
// Populate Tests
// ============================================================================

#[test]
fn test_populate_replaces_on_success() {
    let mut target = login("old", "old");
    target
        .populate(Source::Json(br#"{"username": "foo"}"#))
        .unwrap();
    assert_eq!(target, login("foo", ""));
}

#[test]
fn test_populate_keeps_target_on_error() {
    let mut target = login("old", "old");
    let err = target
        .populate(Source::Json(br#"{"invalid json"}"#))
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert_eq!(target, login("old", "old"));
}

#[test]
fn test_populate_from_value() {
    let mut target = Login::default();
    target
        .populate(Source::Value(serde_json::json!({"username": "foo", "password": "bar"})))
        .unwrap();
    assert_eq!(target, login("foo", "bar"));
}

#[test]
fn test_populate_from_form() {
    let values: FormValues = [("username", "foo"), ("password", "bar")].into_iter().collect();
    let mut target = Login::default();
    target.populate(Source::Form(&values)).unwrap();
    assert_eq!(target, login("foo", "bar"));
}

#[test]
fn test_populate_xml_invalid_utf8() {
    let mut target = Login::default();
    let err = target.populate(Source::Xml(&[0xff, 0xfe])).unwrap_err();
    assert!(err.is_decode_error());
}

// ============================================================================
// Validate Tests
// ============================================================================

#[test]
fn test_validate_default_accepts() {
    struct Plain;
    impl Validate for Plain {}

    assert!(Plain.validate().is_ok());
    assert!(serde_json::Value::Null.validate().is_ok());
}

#[test]
fn test_validate_wrappers_delegate() {
    struct Strict;
    impl Validate for Strict {
        fn validate(&self) -> anyhow::Result<()> {
            anyhow::bail!("always invalid")
        }
    }

    assert!(Box::new(Strict).validate().is_err());
    assert!(Some(Strict).validate().is_err());
    assert!(None::<Strict>.validate().is_ok());
}

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder() {
    let cases = [
        (r"{}", login("", "")),
        (r#"{"username": "foo"}"#, login("foo", "")),
        (r#"{"password": "bar"}"#, login("", "bar")),
        (r#"{"username": "foo","password": "bar"}"#, login("foo", "bar")),
    ];

    for (body, expected) in cases {
        let mut req = request(CONTENT_TYPE_JSON, body);
        let mut actual = Login::default();
        JsonDecoder::new().decode(&mut req, &mut actual).unwrap();
        assert_eq!(actual, expected, "body {body}");
    }
}

#[test]
fn test_json_decoder_malformed() {
    let mut req = request(CONTENT_TYPE_JSON, r#"{"invalid json"}"#);
    let err = JsonDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap_err();
    assert!(err.is_decode_error());
}

#[test]
fn test_json_decoder_type_mismatch() {
    let mut req = request(CONTENT_TYPE_JSON, r#"{"username": 42}"#);
    let err = JsonDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_json_decoder_keeps_body() {
    let body = r#"{"username": "foo"}"#;
    let mut req = request(CONTENT_TYPE_JSON, body);
    JsonDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap();
    assert_eq!(req.body(), body);
}

// ============================================================================
// XML Decoder Tests
// ============================================================================

#[test]
fn test_xml_decoder() {
    let cases = [
        ("<xml></xml>", login("", "")),
        ("<xml><username>foo</username></xml>", login("foo", "")),
        ("<xml><password>bar></password></xml>", login("", "bar>")),
        (
            "<xml><username>foo</username><password>bar</password></xml>",
            login("foo", "bar"),
        ),
    ];

    for (body, expected) in cases {
        let mut req = request("application/xml", body);
        let mut actual = Login::default();
        XmlDecoder::new().decode(&mut req, &mut actual).unwrap();
        assert_eq!(actual, expected, "body {body}");
    }
}

#[test]
fn test_xml_decoder_malformed() {
    let mut req = request("application/xml", "<xml><username>foo</password></xml>");
    let err = XmlDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
}

#[test]
fn test_xml_decoder_keeps_body() {
    let body = "<xml><username>foo</username></xml>";
    let mut req = request("application/xml", body);
    XmlDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap();
    assert_eq!(req.body(), body);
}

// ============================================================================
// YAML Decoder Tests
// ============================================================================

#[test]
fn test_yaml_decoder() {
    let mut req = request("application/yaml", "username: foo\npassword: bar\n");
    let mut actual = Login::default();
    YamlDecoder::new().decode(&mut req, &mut actual).unwrap();
    assert_eq!(actual, login("foo", "bar"));
}

#[test]
fn test_yaml_decoder_malformed() {
    let mut req = request("application/yaml", "username: [foo");
    let err = YamlDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

// ============================================================================
// Form Decoder Tests
// ============================================================================

#[test]
fn test_form_decoder() {
    let mut req = request(
        "application/x-www-form-urlencoded",
        "username=foo&password=bar",
    );
    let mut actual = Login::default();
    FormDecoder::new().decode(&mut req, &mut actual).unwrap();
    assert_eq!(actual, login("foo", "bar"));

    // Body is consumed, parsed values remain reachable
    assert!(req.body().is_empty());
    let values = req.extensions().get::<FormValues>().unwrap();
    assert_eq!(values.get("username"), Some("foo"));
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Tagged {
    title: String,
    tags: Vec<String>,
}

#[test]
fn test_form_decoder_repeated_keys() {
    let mut req = request("application/x-www-form-urlencoded", "title=post&tags=a&tags=b");
    let mut actual = Tagged::default();
    FormDecoder::new().decode(&mut req, &mut actual).unwrap();
    assert_eq!(actual.title, "post");
    assert_eq!(actual.tags, ["a", "b"]);
}

#[test]
fn test_form_decoder_reuses_parsed_values() {
    let mut req = request(
        "application/x-www-form-urlencoded",
        "username=foo&password=bar",
    );
    FormDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap();

    let mut again = Login::default();
    FormDecoder::new().decode(&mut req, &mut again).unwrap();
    assert_eq!(again, login("foo", "bar"));
}

#[test]
fn test_form_decoder_size_limit() {
    let mut req = request(
        "application/x-www-form-urlencoded",
        "username=foo&password=bar",
    );
    let err = FormDecoder::with_max_size(8)
        .decode(&mut req, &mut Login::default())
        .unwrap_err();
    assert!(err.is_decode_error());
    assert!(!req.body().is_empty());
}

#[test]
fn test_form_decoder_malformed_escape() {
    let mut req = request("application/x-www-form-urlencoded", "username=%zz");
    let err = FormDecoder::new()
        .decode(&mut req, &mut Login::default())
        .unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

// ============================================================================
// Multipart Decoder Tests
// ============================================================================

const LOGIN_MULTIPART: &str = "--xxx\r\n\
Content-Disposition: form-data; name=\"username\"\r\n\
\r\n\
foo\r\n\
--xxx\r\n\
Content-Disposition: form-data; name=\"password\"\r\n\
\r\n\
bar\r\n\
--xxx--\r\n";

#[test]
fn test_multipart_decoder() {
    let mut req = request("multipart/form-data; boundary=xxx", LOGIN_MULTIPART);
    let mut actual = Login::default();
    MultipartDecoder::new(1024)
        .decode(&mut req, &mut actual)
        .unwrap();
    assert_eq!(actual, login("foo", "bar"));

    assert!(req.body().is_empty());
    let form = req.extensions().get::<MultipartForm>().unwrap();
    assert_eq!(form.values.get("password"), Some("bar"));
}

#[test]
fn test_multipart_decoder_repeated_keys() {
    let body = "--xxx\r\n\
Content-Disposition: form-data; name=\"tags\"\r\n\
\r\n\
a\r\n\
--xxx\r\n\
Content-Disposition: form-data; name=\"tags\"\r\n\
\r\n\
b\r\n\
--xxx--\r\n";
    let mut req = request("multipart/form-data; boundary=xxx", body);
    let mut actual = Tagged::default();
    MultipartDecoder::new(1024)
        .decode(&mut req, &mut actual)
        .unwrap();
    assert_eq!(actual.tags, ["a", "b"]);
}

#[test]
fn test_multipart_decoder_missing_boundary() {
    let mut req = request(CONTENT_TYPE_MULTIPART_FORM, LOGIN_MULTIPART);
    let err = MultipartDecoder::new(1024)
        .decode(&mut req, &mut Login::default())
        .unwrap_err();
    assert!(matches!(err, Error::Multipart(_)));
}

#[test]
fn test_multipart_decoder_without_content_type() {
    let mut req = http::Request::builder()
        .method("POST")
        .uri("/login")
        .body(Bytes::from_static(b"--xxx--"))
        .unwrap();
    let result = MultipartDecoder::new(1024).decode(&mut req, &mut Login::default());
    assert!(result.is_err());
}

#[test]
fn test_multipart_decoder_defaults() {
    assert_eq!(
        MultipartDecoder::default().max_memory(),
        crate::types::DEFAULT_MAX_MEMORY
    );
}

// ============================================================================
// Closure Decoder Tests
// ============================================================================

#[test]
fn test_closure_decoder() {
    let decoder = |req: &mut Request, target: &mut dyn Populate| {
        let text = String::from_utf8_lossy(req.body()).into_owned();
        target.populate(Source::Value(serde_json::json!({ "username": text })))
    };

    let mut req = request("text/plain", "foo");
    let mut actual = Login::default();
    decoder.decode(&mut req, &mut actual).unwrap();
    assert_eq!(actual, login("foo", ""));
}
