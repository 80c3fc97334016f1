//! Change-detection poller.
//!
//! Samples the OS clipboard on a fixed interval and hands at most one
//! admitted change per tick to the history store. Text and image are tracked
//! independently; text wins when both slots change within one tick, and the
//! image check is deferred to the next tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::{Duration, Instant};

use log::{debug, error, info};
use tokio::sync::RwLock;

use crate::core::classifier::{classify_image, classify_text, image_signature};
use crate::infrastructure::storage::history::ClipHistoryStore;
use crate::interface::SystemClipboard;
use crate::payload::ClipPayload;

/// Sampling interval. Trades responsiveness against CPU cost; copies that are
/// overwritten within one interval can lose the intermediate value, which is
/// accepted.
pub const POLL_INTERVAL: Duration = Duration::from_millis(450);

/// Minimum gap between two ticks. Rejects re-entrant/early fires even under a
/// misbehaving scheduler.
pub const MIN_TICK_GAP: Duration = Duration::from_millis(200);

/// Last-seen state per content kind. Owned by the poller instance so
/// independent pollers (e.g. under test) do not interfere.
#[derive(Default)]
struct LastSeen {
    text: Option<String>,
    image_signature: Option<String>,
}

pub struct ClipboardPoller {
    clipboard: Arc<dyn SystemClipboard>,
    store: Arc<ClipHistoryStore>,
    last_seen: Arc<RwLock<LastSeen>>,
    last_tick_at: StdMutex<Option<Instant>>,
    is_running: Arc<AtomicBool>,
    task: StdMutex<Option<tokio::task::JoinHandle<()>>>,
    poll_interval: Duration,
    min_tick_gap: Duration,
}

impl ClipboardPoller {
    pub fn new(clipboard: Arc<dyn SystemClipboard>, store: Arc<ClipHistoryStore>) -> Self {
        Self {
            clipboard,
            store,
            last_seen: Arc::new(RwLock::new(LastSeen::default())),
            last_tick_at: StdMutex::new(None),
            is_running: Arc::new(AtomicBool::new(false)),
            task: StdMutex::new(None),
            poll_interval: POLL_INTERVAL,
            min_tick_gap: MIN_TICK_GAP,
        }
    }

    /// Override the default timing constants.
    pub fn with_timing(mut self, poll_interval: Duration, min_tick_gap: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.min_tick_gap = min_tick_gap;
        self
    }

    /// Run one sampling pass. Returns true when a new record was emitted.
    ///
    /// Read failures are swallowed per tick — the operation is cheap and
    /// idempotent, so blind retry on the next interval is correct. A
    /// persistence failure leaves the last-seen state untouched so the same
    /// content is retried next tick.
    pub async fn tick(&self) -> bool {
        {
            let mut guard = self.last_tick_at.lock().unwrap();
            if let Some(prev) = *guard {
                if prev.elapsed() < self.min_tick_gap {
                    return false;
                }
            }
            *guard = Some(Instant::now());
        }

        if self.tick_text().await {
            // Text takes priority; a combined text+image clipboard write must
            // not double-emit within one tick.
            return true;
        }

        self.tick_image().await
    }

    async fn tick_text(&self) -> bool {
        let raw = match self.clipboard.read_text().await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("clipboard text read failed, treating tick as no change: {}", e);
                return false;
            }
        };

        let Some(text) = classify_text(&raw) else {
            return false;
        };

        let unchanged = {
            let seen = self.last_seen.read().await;
            seen.text.as_deref() == Some(text.as_str())
        };
        if unchanged {
            return false;
        }

        match self.store.insert_text(&text) {
            Ok(id) => {
                debug!("captured text clip {}", id);
                self.last_seen.write().await.text = Some(text);
                true
            }
            Err(e) => {
                error!("failed to persist text capture, will retry next tick: {}", e);
                false
            }
        }
    }

    async fn tick_image(&self) -> bool {
        let raw = match self.clipboard.read_image_bytes().await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("clipboard image read failed, treating tick as no change: {}", e);
                return false;
            }
        };
        if raw.is_empty() {
            return false;
        }

        let Some(image) = classify_image(raw) else {
            return false;
        };

        let signature = image_signature(&image);
        let unchanged = {
            let seen = self.last_seen.read().await;
            seen.image_signature.as_deref() == Some(signature.as_str())
        };
        if unchanged {
            return false;
        }

        let name = format!("Image {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        match self.store.insert_image(&image, Some(name)) {
            Ok(id) => {
                debug!("captured image clip {}", id);
                self.last_seen.write().await.image_signature = Some(signature);
                true
            }
            Err(e) => {
                error!("failed to persist image capture, will retry next tick: {}", e);
                false
            }
        }
    }

    /// Record a payload the application itself just wrote to the clipboard so
    /// the next tick does not re-capture it as an external change.
    pub async fn mark_seen(&self, payload: &ClipPayload) {
        let mut seen = self.last_seen.write().await;
        match payload {
            ClipPayload::Text(text) => {
                // Store the trimmed form; ticks compare classified values.
                seen.text = classify_text(text.content());
            }
            ClipPayload::Image(image) => {
                seen.image_signature = Some(image_signature(image.content()));
            }
        }
    }

    /// Start the periodic sampling task.
    pub fn start(self: Arc<Self>) -> anyhow::Result<()> {
        if self
            .is_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            anyhow::bail!("poller already running");
        }

        info!(
            "starting clipboard poller (interval {:?}, min gap {:?})",
            self.poll_interval, self.min_tick_gap
        );

        let poller = Arc::clone(&self);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poller.poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if !poller.is_running.load(Ordering::SeqCst) {
                    break;
                }
                poller.tick().await;
            }
            info!("clipboard poller stopped");
        });
        *self.task.lock().unwrap() = Some(handle);

        Ok(())
    }

    /// Stop the sampling task. Must be called before the store and clipboard
    /// handles are torn down so no tick fires against dropped resources.
    ///
    /// The task handle is aborted, not just flagged: a stale loop from a
    /// previous run could otherwise observe the flag re-set by a later
    /// `start()` and keep running next to the fresh task.
    pub fn stop(&self) {
        self.is_running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.task.lock().unwrap().take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }
}
