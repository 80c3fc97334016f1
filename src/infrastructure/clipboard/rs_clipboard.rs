//! System clipboard adapter backed by clipboard-rs.
//!
//! `ClipboardContext` is not `Send` on every platform, so each operation
//! creates a context inside a blocking task instead of holding one across
//! await points.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use clipboard_rs::common::{RustImage, RustImageData};
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat};

use crate::interface::SystemClipboard;

pub struct RsClipboard;

impl RsClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RsClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemClipboard for RsClipboard {
    async fn read_text(&self) -> Result<String> {
        tokio::task::spawn_blocking(|| {
            let ctx = ClipboardContext::new()
                .map_err(|e| anyhow!("failed to open clipboard: {}", e))?;
            if !ctx.has(ContentFormat::Text) {
                return Ok(String::new());
            }
            ctx.get_text()
                .map_err(|e| anyhow!("failed to read clipboard text: {}", e))
        })
        .await?
    }

    async fn read_image_bytes(&self) -> Result<Bytes> {
        tokio::task::spawn_blocking(|| {
            let ctx = ClipboardContext::new()
                .map_err(|e| anyhow!("failed to open clipboard: {}", e))?;
            if !ctx.has(ContentFormat::Image) {
                return Ok(Bytes::new());
            }
            let image = ctx
                .get_image()
                .map_err(|e| anyhow!("failed to read clipboard image: {}", e))?;
            let png = image
                .to_png()
                .map_err(|e| anyhow!("failed to encode clipboard image: {}", e))?;
            Ok(Bytes::copy_from_slice(png.get_bytes()))
        })
        .await?
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let ctx = ClipboardContext::new()
                .map_err(|e| anyhow!("failed to open clipboard: {}", e))?;
            ctx.set_text(text)
                .map_err(|e| anyhow!("failed to write clipboard text: {}", e))
        })
        .await?
    }

    async fn write_image_bytes(&self, bytes: Bytes) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let ctx = ClipboardContext::new()
                .map_err(|e| anyhow!("failed to open clipboard: {}", e))?;
            let image = RustImageData::from_bytes(&bytes)
                .map_err(|e| anyhow!("failed to decode image bytes: {}", e))?;
            ctx.set_image(image)
                .map_err(|e| anyhow!("failed to write clipboard image: {}", e))
        })
        .await?
    }
}
