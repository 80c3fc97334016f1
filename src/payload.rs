//! Clipboard sample payloads.
//!
//! A `ClipPayload` is one raw capture handed from the poller (or the UI copy
//! path) toward the store. Kind and payload are mutually exclusive by
//! construction: the text variant carries a string, the image variant raw
//! encoded bitmap bytes.

use std::fmt;

use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use twox_hash::xxh3::hash64;

/// Content kind of a clip record, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipKind {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "image")]
    Image,
}

impl ClipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipKind::Text => "text",
            ClipKind::Image => "image",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(ClipKind::Text),
            "image" => Some(ClipKind::Image),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TextPayload {
    content: String,
}

impl TextPayload {
    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImagePayload {
    #[serde(
        serialize_with = "serialize_bytes",
        deserialize_with = "deserialize_bytes"
    )]
    content: Bytes,
}

impl ImagePayload {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn serialize_bytes<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let base64_string = base64::engine::general_purpose::STANDARD.encode(bytes);
    serializer.serialize_str(&base64_string)
}

fn deserialize_bytes<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let base64_string = String::deserialize(deserializer)?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(&base64_string)
        .map_err(|e| serde::de::Error::custom(e.to_string()))?;
    Ok(Bytes::from(bytes))
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum ClipPayload {
    Text(TextPayload),
    Image(ImagePayload),
}

impl ClipPayload {
    pub fn new_text(content: impl Into<String>) -> Self {
        ClipPayload::Text(TextPayload {
            content: content.into(),
        })
    }

    pub fn new_image(content: Bytes) -> Self {
        ClipPayload::Image(ImagePayload { content })
    }

    pub fn kind(&self) -> ClipKind {
        match self {
            ClipPayload::Text(_) => ClipKind::Text,
            ClipPayload::Image(_) => ClipKind::Image,
        }
    }

    /// Comparison key for duplicate suppression.
    ///
    /// Text uses a content hash only for display; dedup of text happens on
    /// exact content equality (strings are cheap to compare). Images use the
    /// length-plus-prefix signature from the classifier.
    pub fn signature_key(&self) -> String {
        match self {
            ClipPayload::Text(p) => format!("txt_{:016x}", hash64(p.content.as_bytes())),
            ClipPayload::Image(p) => {
                format!("img_{}", crate::core::classifier::image_signature(&p.content))
            }
        }
    }

    /// Whether two payloads represent the same clipboard content.
    ///
    /// Text compares exact content; images compare signatures. Payloads of
    /// different kinds are never duplicates.
    pub fn is_duplicate(&self, other: &ClipPayload) -> bool {
        match (self, other) {
            (ClipPayload::Text(a), ClipPayload::Text(b)) => a.content == b.content,
            (ClipPayload::Image(a), ClipPayload::Image(b)) => {
                crate::core::classifier::image_signature(&a.content)
                    == crate::core::classifier::image_signature(&b.content)
            }
            _ => false,
        }
    }
}

fn friendly_size(size: usize) -> String {
    if size < 1024 {
        format!("{} B", size)
    } else if size < 1024 * 1024 {
        format!("{} KB", size / 1024)
    } else {
        format!("{} MB", size / 1024 / 1024)
    }
}

impl fmt::Display for ClipPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipPayload::Text(text) => write!(
                f,
                "text clip - key: {}, length: {}",
                self.signature_key(),
                friendly_size(text.content.len())
            ),
            ClipPayload::Image(image) => write!(
                f,
                "image clip - key: {}, size: {}",
                self.signature_key(),
                friendly_size(image.content.len())
            ),
        }
    }
}

impl PartialEq for ClipPayload {
    fn eq(&self, other: &Self) -> bool {
        self.signature_key() == other.signature_key()
    }
}

impl Eq for ClipPayload {}
