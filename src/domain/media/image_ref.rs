// SPDX-License-Identifier: MPL-2.0
//! Polymorphic image reference.
//!
//! Items come either as a bare URL / data URI or as a record carrying a
//! `url` plus arbitrary metadata. Every consumer resolves both shapes the same
//! way through [`ImageRef::url`].

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Prefix identifying inline image data.
pub const DATA_URI_PREFIX: &str = "data:";

/// Prefix applied to bare base64 payloads returned by a generation run.
pub const PNG_BASE64_PREFIX: &str = "data:image/png;base64,";

/// Immutable item list shared between the gallery and the viewer.
///
/// The loader replaces it wholesale on reload; the viewer keeps whichever
/// snapshot it was opened with.
pub type ImageList = Arc<[ImageRef]>;

/// A reference to one displayable image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Raw URL or data URI.
    Url(String),
    /// Record with a URL and free-form metadata (file name, seed, ...).
    Record {
        url: String,
        metadata: BTreeMap<String, String>,
    },
    /// Neither a string nor a record with a usable `url`.
    Invalid,
}

impl ImageRef {
    /// Creates a reference from a bare URL. Empty strings are invalid.
    pub fn url_only(url: impl Into<String>) -> Self {
        let url = url.into();
        if url.is_empty() {
            Self::Invalid
        } else {
            Self::Url(url)
        }
    }

    /// Creates a record reference. An empty URL yields [`ImageRef::Invalid`].
    pub fn record(url: impl Into<String>, metadata: BTreeMap<String, String>) -> Self {
        let url = url.into();
        if url.is_empty() {
            Self::Invalid
        } else {
            Self::Record { url, metadata }
        }
    }

    /// Resolves the displayable source, `None` for malformed references.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            ImageRef::Url(url) | ImageRef::Record { url, .. } => Some(url),
            ImageRef::Invalid => None,
        }
    }

    /// Returns a metadata value for record references.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&str> {
        match self {
            ImageRef::Record { metadata, .. } => metadata.get(key).map(String::as_str),
            _ => None,
        }
    }

    /// Whether the image data is inline and needs no network fetch.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.url().is_some_and(|url| url.starts_with(DATA_URI_PREFIX))
    }

    /// Rewrites the URL in place, keeping the shape and metadata.
    #[must_use]
    pub fn map_url(self, f: impl FnOnce(String) -> String) -> Self {
        match self {
            ImageRef::Url(url) => ImageRef::url_only(f(url)),
            ImageRef::Record { url, metadata } => ImageRef::record(f(url), metadata),
            ImageRef::Invalid => ImageRef::Invalid,
        }
    }
}

impl From<String> for ImageRef {
    fn from(url: String) -> Self {
        Self::url_only(url)
    }
}

impl From<&str> for ImageRef {
    fn from(url: &str) -> Self {
        Self::url_only(url)
    }
}

/// Wire shape of an item: a string, an object, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawImageRef {
    Url(String),
    Record(BTreeMap<String, serde_json::Value>),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for ImageRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawImageRef::deserialize(deserializer)? {
            RawImageRef::Url(url) => ImageRef::url_only(url),
            RawImageRef::Record(mut fields) => match fields.remove("url") {
                Some(serde_json::Value::String(url)) => {
                    let metadata = fields
                        .into_iter()
                        .map(|(key, value)| match value {
                            serde_json::Value::String(text) => (key, text),
                            other => (key, other.to_string()),
                        })
                        .collect();
                    ImageRef::record(url, metadata)
                }
                _ => ImageRef::Invalid,
            },
            RawImageRef::Other(_) => ImageRef::Invalid,
        })
    }
}

/// Normalizes one-off generation output into viewer-ready references.
///
/// Generation returns either complete data URIs or bare base64 PNG payloads;
/// the latter are prefixed so every entry is a usable source.
pub fn normalize_generated<I, S>(images: I) -> Vec<ImageRef>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    images
        .into_iter()
        .map(|image| {
            let image = image.into();
            if image.is_empty() || image.starts_with(DATA_URI_PREFIX) {
                ImageRef::url_only(image)
            } else {
                ImageRef::Url(format!("{PNG_BASE64_PREFIX}{image}"))
            }
        })
        .collect()
}
