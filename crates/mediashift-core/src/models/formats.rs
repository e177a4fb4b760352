//! Format variant model stored in the `formats` column.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::public_url::PublicUrlBuilder;

/// One pre-generated variant of a media file (large, small, medium, thumbnail).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Format {
    pub url: String,
    pub ext: String,
    pub hash: String,
    pub mime: String,
    pub name: String,
    pub path: String,
    pub size: f64,
    pub width: i64,
    pub height: i64,
}

/// Contents of `formats`: the canonical URL plus the four variants.
///
/// Serialization always emits every field, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFormats {
    pub url: String,
    pub large: Format,
    pub small: Format,
    pub medium: Format,
    pub thumbnail: Format,
}

#[derive(Debug, thiserror::Error)]
pub enum FormatsParseError {
    #[error("invalid formats JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("formats JSON is not an object")]
    NotAnObject,

    #[error("formats field `{0}` has an unexpected type")]
    FieldType(String),
}

impl FileFormats {
    /// Best-effort decode of the stored text.
    ///
    /// Never fails: unreadable input yields zero values, and fields with the wrong
    /// type are left at their defaults while the rest of the object is still read.
    /// The first problem encountered is returned alongside the value. JSON `null`
    /// decodes to the default without an error.
    pub fn parse_lenient(raw: &str) -> (Self, Option<FormatsParseError>) {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => return (Self::default(), Some(e.into())),
        };
        let object = match value {
            Value::Null => return (Self::default(), None),
            Value::Object(object) => object,
            _ => return (Self::default(), Some(FormatsParseError::NotAnObject)),
        };

        let mut first_error = None;
        let mut reader = FieldReader {
            object: &object,
            prefix: "",
            first_error: &mut first_error,
        };
        let formats = FileFormats {
            url: reader.read("url"),
            large: reader.variant("large"),
            small: reader.variant("small"),
            medium: reader.variant("medium"),
            thumbnail: reader.variant("thumbnail"),
        };
        (formats, first_error)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Point every URL at the bucket.
    ///
    /// The canonical `url` is derived from `object_key`; each variant URL is
    /// normalized from its current value.
    pub fn rewrite_urls(&mut self, urls: &PublicUrlBuilder, object_key: &str) {
        self.url = urls.normalize(object_key);
        for variant in self.variants_mut() {
            variant.url = urls.normalize(&variant.url);
        }
    }

    fn variants_mut(&mut self) -> [&mut Format; 4] {
        [
            &mut self.large,
            &mut self.small,
            &mut self.medium,
            &mut self.thumbnail,
        ]
    }
}

struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    prefix: &'a str,
    first_error: &'a mut Option<FormatsParseError>,
}

impl<'a> FieldReader<'a> {
    /// Exact key first, then a case-insensitive match.
    fn lookup(&self, key: &str) -> Option<&'a Value> {
        let object = self.object;
        object.get(key).or_else(|| {
            object
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
                .map(|(_, value)| value)
        })
    }

    fn record_error(&mut self, key: &str) {
        if self.first_error.is_none() {
            *self.first_error = Some(FormatsParseError::FieldType(format!(
                "{}{}",
                self.prefix, key
            )));
        }
    }

    fn read<T: DeserializeOwned + Default>(&mut self, key: &str) -> T {
        match self.lookup(key) {
            None | Some(Value::Null) => T::default(),
            Some(value) => match T::deserialize(value) {
                Ok(parsed) => parsed,
                Err(_) => {
                    self.record_error(key);
                    T::default()
                }
            },
        }
    }

    fn variant(&mut self, key: &str) -> Format {
        let object = match self.lookup(key) {
            None | Some(Value::Null) => return Format::default(),
            Some(Value::Object(object)) => object,
            Some(_) => {
                self.record_error(key);
                return Format::default();
            }
        };
        let prefix = format!("{}.", key);
        let mut reader = FieldReader {
            object,
            prefix: &prefix,
            first_error: &mut *self.first_error,
        };
        Format {
            url: reader.read("url"),
            ext: reader.read("ext"),
            hash: reader.read("hash"),
            mime: reader.read("mime"),
            name: reader.read("name"),
            path: reader.read("path"),
            size: reader.read("size"),
            width: reader.read("width"),
            height: reader.read("height"),
        }
    }
}
