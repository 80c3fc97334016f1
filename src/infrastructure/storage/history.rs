//! Clip history store.
//!
//! Owns the record lifecycle: insert-with-dedup, ranked/filtered reads,
//! metadata mutations and deletion. Replace semantics promote a re-copied
//! value to the front of history instead of appending a duplicate. Every
//! mutation fires the change notifier after commit.

use std::sync::Arc;

use diesel::Connection;
use log::info;
use uuid::Uuid;

use crate::core::classifier::{encode_image_payload, image_signature};
use crate::core::filter::SearchFilter;
use crate::error::{AppError, Result};
use crate::infrastructure::event::ChangeNotifier;
use crate::infrastructure::storage::db::dao::clip_record as dao;
use crate::infrastructure::storage::db::models::clip_record::{
    DbClipRecord, NewClipRecord, UpdateClipRecord,
};
use crate::infrastructure::storage::db::pool::DbPool;
use crate::interface::Clock;
use crate::payload::ClipKind;

/// Maximum rows materialized per query. History grows unbounded in storage;
/// only this recent slice ever reaches the UI.
pub const QUERY_CAP: i64 = 300;

/// How many recent image records the signature dedup scans.
pub const IMAGE_DEDUP_WINDOW: i64 = 30;

/// One metadata mutation. Kind-restricted variants reject the wrong kind with
/// a validation error; all variants stamp `updated_at`.
#[derive(Debug, Clone)]
pub enum RecordPatch {
    TogglePinned,
    SetPinned(bool),
    SetTags(Vec<String>),
    /// Text-kind records only.
    SetText(String),
    /// Image-kind records only.
    SetDisplayName(String),
    SetBorderColor(Option<String>),
    SetBackgroundColor(Option<String>),
}

pub struct ClipHistoryStore {
    db: Arc<DbPool>,
    clock: Arc<dyn Clock>,
    notifier: Arc<ChangeNotifier>,
    query_cap: i64,
    image_dedup_window: i64,
}

impl ClipHistoryStore {
    pub fn new(db: Arc<DbPool>, clock: Arc<dyn Clock>, notifier: Arc<ChangeNotifier>) -> Self {
        Self {
            db,
            clock,
            notifier,
            query_cap: QUERY_CAP,
            image_dedup_window: IMAGE_DEDUP_WINDOW,
        }
    }

    /// Override the query cap and image dedup window defaults.
    pub fn with_limits(mut self, query_cap: i64, image_dedup_window: i64) -> Self {
        self.query_cap = query_cap;
        self.image_dedup_window = image_dedup_window;
        self
    }

    pub fn notifier(&self) -> Arc<ChangeNotifier> {
        self.notifier.clone()
    }

    fn new_record(&self, kind: ClipKind, content: String) -> NewClipRecord {
        NewClipRecord {
            id: Uuid::new_v4().to_string(),
            kind: kind.as_str().to_string(),
            content,
            display_name: None,
            signature: None,
            pinned: false,
            tags: "[]".to_string(),
            created_at: self.clock.now_ms(),
        }
    }

    /// Insert a text capture. An exact (case-sensitive) duplicate is deleted
    /// first, so the value re-enters history at the front with a fresh id and
    /// timestamp.
    pub fn insert_text(&self, text: &str) -> Result<String> {
        let record = self.new_record(ClipKind::Text, text.to_string());
        let id = record.id.clone();

        let mut conn = self.db.get()?;
        conn.transaction::<_, anyhow::Error, _>(|conn| {
            if let Some(existing) = dao::find_text_record(conn, text)? {
                dao::delete_clip_record(conn, &existing.id)?;
            }
            dao::insert_clip_record(conn, &record)?;
            Ok(())
        })?;

        self.notifier.notify();
        Ok(id)
    }

    /// Insert an image capture. Dedup is signature-based and scoped to the
    /// most recent window of image records, not the full history — a missed
    /// match only costs one redundant row.
    pub fn insert_image(&self, bytes: &[u8], display_name: Option<String>) -> Result<String> {
        let signature = image_signature(bytes);
        let mut record = self.new_record(ClipKind::Image, encode_image_payload(bytes));
        record.display_name = display_name;
        record.signature = Some(signature.clone());
        let id = record.id.clone();

        let window = self.image_dedup_window;
        let mut conn = self.db.get()?;
        conn.transaction::<_, anyhow::Error, _>(|conn| {
            let recent = dao::recent_image_records(conn, window)?;
            if let Some(dup) = recent
                .iter()
                .find(|r| r.signature.as_deref() == Some(signature.as_str()))
            {
                dao::delete_clip_record(conn, &dup.id)?;
            }
            dao::insert_clip_record(conn, &record)?;
            Ok(())
        })?;

        self.notifier.notify();
        Ok(id)
    }

    /// Ranked, filtered read: pinned first, then newest first, capped, then
    /// filtered by the search token.
    pub fn query(&self, token: &str) -> Result<Vec<DbClipRecord>> {
        let mut conn = self.db.get()?;
        let mut records = dao::query_clip_records(&mut conn, self.query_cap)?;
        let filter = SearchFilter::parse(token);
        records.retain(|r| filter.matches(r));
        Ok(records)
    }

    pub fn get(&self, id: &str) -> Result<Option<DbClipRecord>> {
        let mut conn = self.db.get()?;
        Ok(dao::get_clip_record_by_id(&mut conn, id)?)
    }

    /// Apply a metadata patch. A missing id is a no-op success — the UI may
    /// race a mutation against a concurrent delete.
    pub fn mutate(&self, id: &str, patch: RecordPatch) -> Result<()> {
        let mut conn = self.db.get()?;

        let Some(existing) = dao::get_clip_record_by_id(&mut conn, id)? else {
            return Ok(());
        };

        let mut update = UpdateClipRecord {
            updated_at: Some(self.clock.now_ms()),
            ..UpdateClipRecord::default()
        };

        match patch {
            RecordPatch::TogglePinned => update.pinned = Some(!existing.pinned),
            RecordPatch::SetPinned(pinned) => update.pinned = Some(pinned),
            RecordPatch::SetTags(tags) => {
                update.tags = Some(serde_json::to_string(&tags)?);
            }
            RecordPatch::SetText(text) => {
                if existing.clip_kind() != Some(ClipKind::Text) {
                    return Err(AppError::validation(
                        "Cannot set text content on an image record",
                    ));
                }
                let Some(trimmed) = crate::core::classifier::classify_text(&text) else {
                    return Err(AppError::validation("Text content cannot be empty"));
                };
                update.content = Some(trimmed);
            }
            RecordPatch::SetDisplayName(name) => {
                if existing.clip_kind() != Some(ClipKind::Image) {
                    return Err(AppError::validation(
                        "Display names only apply to image records",
                    ));
                }
                update.display_name = Some(Some(name));
            }
            RecordPatch::SetBorderColor(color) => update.border_color = Some(color),
            RecordPatch::SetBackgroundColor(color) => update.background_color = Some(color),
        }

        dao::update_clip_record(&mut conn, id, &update)?;
        self.notifier.notify();
        Ok(())
    }

    /// Delete by id. Deleting a missing id succeeds (idempotent) and fires no
    /// notification, matching `mutate`'s missing-id silence.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut conn = self.db.get()?;
        let affected = dao::delete_clip_record(&mut conn, id)?;
        if affected > 0 {
            self.notifier.notify();
        }
        Ok(())
    }

    pub fn delete_all(&self) -> Result<usize> {
        let mut conn = self.db.get()?;
        let count = dao::clear_all_records(&mut conn)?;
        info!("cleared {} clip records", count);
        self.notifier.notify();
        Ok(count)
    }

    pub fn record_count(&self) -> Result<i64> {
        let mut conn = self.db.get()?;
        Ok(dao::get_record_count(&mut conn)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct ManualClock {
        ms: AtomicI64,
    }

    impl ManualClock {
        fn new(start: i64) -> Self {
            Self {
                ms: AtomicI64::new(start),
            }
        }

        fn advance(&self, delta: i64) {
            self.ms.fetch_add(delta, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_ms(&self) -> i64 {
            self.ms.load(Ordering::SeqCst)
        }
    }

    fn test_store() -> (TempDir, Arc<ManualClock>, ClipHistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let db = Arc::new(DbPool::new(&dir.path().join("clips.db")).unwrap());
        let clock = Arc::new(ManualClock::new(1_000));
        let store = ClipHistoryStore::new(db, clock.clone(), Arc::new(ChangeNotifier::new()));
        (dir, clock, store)
    }

    #[test]
    fn test_replace_on_duplicate_text() {
        let (_dir, clock, store) = test_store();

        let first_id = store.insert_text("abc").unwrap();
        clock.advance(500);
        let second_id = store.insert_text("abc").unwrap();

        assert_ne!(first_id, second_id);
        assert_eq!(store.record_count().unwrap(), 1);

        let records = store.query("").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, second_id);
        assert_eq!(records[0].content, "abc");
        assert_eq!(records[0].created_at, 1_500);
        assert!(store.get(&first_id).unwrap().is_none());
    }

    #[test]
    fn test_text_dedup_is_case_sensitive() {
        let (_dir, _clock, store) = test_store();
        store.insert_text("abc").unwrap();
        store.insert_text("ABC").unwrap();
        assert_eq!(store.record_count().unwrap(), 2);
    }

    #[test]
    fn test_image_dedup_within_window() {
        let (_dir, clock, store) = test_store();
        let image = vec![9u8; 9000];

        store.insert_image(&image, Some("a.png".into())).unwrap();
        clock.advance(10);
        let second = store.insert_image(&image, Some("b.png".into())).unwrap();

        assert_eq!(store.record_count().unwrap(), 1);
        let records = store.query("image").unwrap();
        assert_eq!(records[0].id, second);
    }

    #[test]
    fn test_image_dedup_window_is_bounded() {
        let (_dir, clock, store) = test_store();
        let store = store.with_limits(QUERY_CAP, 2);

        let target = vec![1u8; 9000];
        store.insert_image(&target, None).unwrap();
        // Push the target out of the 2-record window
        for fill in [2u8, 3u8] {
            clock.advance(10);
            store.insert_image(&vec![fill; 9000], None).unwrap();
        }
        clock.advance(10);
        store.insert_image(&target, None).unwrap();

        // Out-of-window duplicate is kept: redundancy over a full-history scan
        assert_eq!(store.record_count().unwrap(), 4);
    }

    #[test]
    fn test_query_cap_and_ordering() {
        let (_dir, clock, store) = test_store();
        let store = store.with_limits(5, IMAGE_DEDUP_WINDOW);

        let mut pinned_id = String::new();
        for i in 0..8 {
            clock.advance(10);
            let id = store.insert_text(&format!("clip-{}", i)).unwrap();
            if i == 2 {
                pinned_id = id;
            }
        }
        store
            .mutate(&pinned_id, RecordPatch::SetPinned(true))
            .unwrap();

        let records = store.query("").unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].id, pinned_id);
        // Remaining rows are newest-first
        let times: Vec<i64> = records[1..].iter().map(|r| r.created_at).collect();
        let mut sorted = times.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(times, sorted);
    }

    #[test]
    fn test_query_applies_search_filter() {
        let (_dir, _clock, store) = test_store();
        store.insert_text("hello world").unwrap();
        store
            .insert_image(&vec![5u8; 9000], Some("cat.png".into()))
            .unwrap();

        let images = store.query("image").unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].kind, "image");

        let cats = store.query("cat").unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].display_name.as_deref(), Some("cat.png"));

        let hellos = store.query("hello").unwrap();
        assert_eq!(hellos.len(), 1);
        assert_eq!(hellos[0].content, "hello world");
    }

    #[test]
    fn test_mutate_stamps_updated_at() {
        let (_dir, clock, store) = test_store();
        let id = store.insert_text("abc").unwrap();

        clock.advance(250);
        store
            .mutate(&id, RecordPatch::SetTags(vec!["work".into()]))
            .unwrap();

        let record = store.get(&id).unwrap().unwrap();
        assert_eq!(record.updated_at, Some(1_250));
        assert_eq!(record.tag_list(), vec!["work".to_string()]);
    }

    #[test]
    fn test_mutate_missing_id_is_noop() {
        let (_dir, _clock, store) = test_store();
        store.mutate("no-such-id", RecordPatch::TogglePinned).unwrap();
    }

    #[test]
    fn test_mutate_kind_restrictions() {
        let (_dir, _clock, store) = test_store();
        let text_id = store.insert_text("abc").unwrap();
        let image_id = store.insert_image(&vec![5u8; 9000], None).unwrap();

        let err = store
            .mutate(&text_id, RecordPatch::SetDisplayName("x".into()))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = store
            .mutate(&image_id, RecordPatch::SetText("x".into()))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = store
            .mutate(&text_id, RecordPatch::SetText("   ".into()))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_set_text_stores_trimmed() {
        let (_dir, _clock, store) = test_store();
        let id = store.insert_text("abc").unwrap();
        store
            .mutate(&id, RecordPatch::SetText(" edited ".into()))
            .unwrap();
        assert_eq!(store.get(&id).unwrap().unwrap().content, "edited");
    }

    #[test]
    fn test_colors_set_and_clear() {
        let (_dir, _clock, store) = test_store();
        let id = store.insert_text("abc").unwrap();

        store
            .mutate(&id, RecordPatch::SetBorderColor(Some("#ff0000".into())))
            .unwrap();
        assert_eq!(
            store.get(&id).unwrap().unwrap().border_color.as_deref(),
            Some("#ff0000")
        );

        store
            .mutate(&id, RecordPatch::SetBorderColor(None))
            .unwrap();
        assert!(store.get(&id).unwrap().unwrap().border_color.is_none());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let (_dir, _clock, store) = test_store();
        let id = store.insert_text("abc").unwrap();

        store.delete(&id).unwrap();
        store.delete(&id).unwrap();
        assert_eq!(store.record_count().unwrap(), 0);
    }

    #[test]
    fn test_delete_all() {
        let (_dir, _clock, store) = test_store();
        store.insert_text("a").unwrap();
        store.insert_text("b").unwrap();
        assert_eq!(store.delete_all().unwrap(), 2);
        assert_eq!(store.record_count().unwrap(), 0);
    }

    #[test]
    fn test_notifier_fires_on_writes() {
        let (_dir, _clock, store) = test_store();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        store.notifier().subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let id = store.insert_text("abc").unwrap();
        store.mutate(&id, RecordPatch::TogglePinned).unwrap();
        store.delete(&id).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        // No-op writes stay silent
        store.delete(&id).unwrap();
        store.mutate(&id, RecordPatch::TogglePinned).unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
