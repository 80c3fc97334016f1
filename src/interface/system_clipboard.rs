//! System clipboard port - abstracts OS clipboard access.
//!
//! The poller reads through this trait and the user-copy path writes through
//! it, so tests can substitute an in-memory clipboard.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait SystemClipboard: Send + Sync {
    /// Read the current clipboard text. Empty string when no text is present.
    async fn read_text(&self) -> Result<String>;

    /// Read the current clipboard bitmap as encoded PNG bytes. Empty when no
    /// image is present.
    async fn read_image_bytes(&self) -> Result<Bytes>;

    /// Replace the clipboard content with text.
    async fn write_text(&self, text: &str) -> Result<()>;

    /// Replace the clipboard content with an image decoded from PNG bytes.
    async fn write_image_bytes(&self, bytes: Bytes) -> Result<()>;
}
