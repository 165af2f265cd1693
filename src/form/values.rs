//! Multi-valued form fields

use super::de::FormDeserializer;
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Parsed form fields, keyed by name, each holding every submitted value
///
/// Produced by the urlencoded and multipart decoders and stored in the
/// request extensions so later handlers can read the raw fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, Vec<String>>,
}

impl FormValues {
    /// Create an empty set of values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` body
    ///
    /// The body must be UTF-8 and every `%` must start a two-digit hex
    /// escape.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(body)
            .map_err(|e| Error::decode(format!("form body is not valid UTF-8: {e}")))?;
        check_escapes(text)?;

        Ok(form_urlencoded::parse(text.as_bytes())
            .into_owned()
            .collect())
    }

    /// Append a value for a key
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// First value submitted for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Every value submitted for a key
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check whether a key was submitted
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no keys were submitted
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over keys and their values in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Encode every key/value pair as `application/x-www-form-urlencoded`
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, values) in &self.values {
            for value in values {
                serializer.append_pair(key, value);
            }
        }
        serializer.finish()
    }

    /// Bind the values onto a typed target
    ///
    /// Field names follow the target's serde names and unknown keys are
    /// ignored. Sequence fields (`Vec<T>`, tuples) receive every value
    /// submitted under their key; other fields receive the first one.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(FormDeserializer::new(self))?)
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.append(key, value);
        }
        values
    }
}

/// Reject `%` sequences that are not followed by two hex digits
fn check_escapes(text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            match escape {
                Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => {
                    let end = (i + 3).min(bytes.len());
                    return Err(Error::decode(format!(
                        "invalid URL escape {:?}",
                        String::from_utf8_lossy(&bytes[i..end])
                    )));
                }
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}
