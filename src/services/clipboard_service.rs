//! Clipboard history service - the UI-facing facade.
//!
//! Wires the poller, store and notifier together and exposes the boundary
//! operations the presentation layer consumes: query, mutations, the
//! user-copy path with self-write suppression, and settings access.

use std::sync::Arc;

use bytes::Bytes;
use log::info;

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::infrastructure::clipboard::ClipboardPoller;
use crate::infrastructure::event::{ChangeNotifier, ListenerId};
use crate::infrastructure::storage::db::models::clip_record::DbClipRecord;
use crate::infrastructure::storage::db::pool::DbPool;
use crate::infrastructure::storage::history::{ClipHistoryStore, RecordPatch};
use crate::interface::{Clock, SystemClipboard, SystemClock};
use crate::payload::ClipPayload;

pub struct ClipboardHistoryService {
    clipboard: Arc<dyn SystemClipboard>,
    store: Arc<ClipHistoryStore>,
    poller: Arc<ClipboardPoller>,
    db: Arc<DbPool>,
    notifier: Arc<ChangeNotifier>,
}

impl ClipboardHistoryService {
    pub fn new(clipboard: Arc<dyn SystemClipboard>, db: Arc<DbPool>) -> Self {
        Self::with_clock(clipboard, db, Arc::new(SystemClock))
    }

    pub fn with_clock(
        clipboard: Arc<dyn SystemClipboard>,
        db: Arc<DbPool>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let notifier = Arc::new(ChangeNotifier::new());
        let store = Arc::new(ClipHistoryStore::new(db.clone(), clock, notifier.clone()));
        let poller = Arc::new(ClipboardPoller::new(clipboard.clone(), store.clone()));

        Self {
            clipboard,
            store,
            poller,
            db,
            notifier,
        }
    }

    /// Rebuild the poller with non-default timing. Call before sharing the
    /// poller handle.
    pub fn with_poller_timing(
        mut self,
        poll_interval: std::time::Duration,
        min_tick_gap: std::time::Duration,
    ) -> Self {
        self.poller = Arc::new(
            ClipboardPoller::new(self.clipboard.clone(), self.store.clone())
                .with_timing(poll_interval, min_tick_gap),
        );
        self
    }

    /// Seed settings and start the polling loop.
    pub fn start(&self) -> Result<()> {
        Settings::seed(&self.db)?;
        Arc::clone(&self.poller).start()?;
        info!("clipboard history service started");
        Ok(())
    }

    /// Stop the polling loop. Call before tearing down the store so no timer
    /// fires against dropped handles.
    pub fn stop(&self) {
        self.poller.stop();
        info!("clipboard history service stopped");
    }

    /// Register a callback fired after any store mutation.
    pub fn subscribe<F>(&self, callback: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Ranked, filtered history slice for the popup.
    pub fn query(&self, token: &str) -> Result<Vec<DbClipRecord>> {
        self.store.query(token)
    }

    /// Write a history entry back to the OS clipboard.
    ///
    /// The payload is marked seen before the write so an in-flight tick
    /// cannot re-capture our own write as a new external change.
    pub async fn record_user_copy(&self, payload: ClipPayload) -> Result<()> {
        self.poller.mark_seen(&payload).await;

        match &payload {
            ClipPayload::Text(text) => self
                .clipboard
                .write_text(text.content())
                .await
                .map_err(|e| AppError::clipboard(e.to_string()))?,
            ClipPayload::Image(image) => self
                .clipboard
                .write_image_bytes(Bytes::copy_from_slice(image.content()))
                .await
                .map_err(|e| AppError::clipboard(e.to_string()))?,
        }
        Ok(())
    }

    pub fn mutate(&self, id: &str, patch: RecordPatch) -> Result<()> {
        self.store.mutate(id, patch)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id)
    }

    pub fn delete_all(&self) -> Result<usize> {
        self.store.delete_all()
    }

    pub fn settings(&self) -> Result<Settings> {
        Settings::load(&self.db)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        settings.save(&self.db)
    }

    /// Poller handle, used by tests to drive ticks manually.
    pub fn poller(&self) -> Arc<ClipboardPoller> {
        self.poller.clone()
    }

    pub fn store(&self) -> Arc<ClipHistoryStore> {
        self.store.clone()
    }
}
