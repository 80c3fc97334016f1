//! Admission rules and content signatures for raw clipboard samples.
//!
//! The classifier decides whether a sample may become a clip record and
//! computes the comparison key used for image dedup. Rejections here are
//! expected and frequent (empty text, ghost icons) and are not errors.

use base64::Engine;
use bytes::Bytes;
use twox_hash::xxh3::hash64;

/// Minimum admissible image payload size. Some OS copy actions place tiny
/// placeholder bitmaps on the clipboard; anything below this floor is noise.
pub const MIN_IMAGE_BYTES: usize = 8 * 1024;

/// Number of leading bytes hashed into an image signature.
pub const SIGNATURE_PREFIX_LEN: usize = 64;

/// Trim and admit non-empty text. The admitted value is the trimmed string
/// and is stored verbatim.
pub fn classify_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Admit image bytes above the size floor.
pub fn classify_image(bytes: Bytes) -> Option<Bytes> {
    if bytes.len() < MIN_IMAGE_BYTES {
        None
    } else {
        Some(bytes)
    }
}

/// Cheap image fingerprint: total length combined with a hash of a fixed-size
/// prefix. Not cryptographic — it is only compared across a bounded recent
/// window, where a missed match costs one redundant record.
pub fn image_signature(bytes: &[u8]) -> String {
    let prefix = &bytes[..bytes.len().min(SIGNATURE_PREFIX_LEN)];
    format!("{:x}:{:016x}", bytes.len(), hash64(prefix))
}

/// Storage form of an image payload: a base64 PNG data URI.
pub fn encode_image_payload(bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}
