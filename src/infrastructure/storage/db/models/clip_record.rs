use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::payload::ClipKind;

/// A persisted clip record.
///
/// Exactly one payload interpretation applies per row: text rows keep the
/// literal string in `content`, image rows keep a base64 PNG data URI plus a
/// dedup `signature`. Timestamps are epoch milliseconds.
#[derive(Queryable, Selectable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::clip_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbClipRecord {
    pub id: String,
    pub kind: String,
    pub content: String,
    pub display_name: Option<String>,
    pub signature: Option<String>,
    pub pinned: bool,
    pub tags: String,
    pub border_color: Option<String>,
    pub background_color: Option<String>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl DbClipRecord {
    pub fn clip_kind(&self) -> Option<ClipKind> {
        ClipKind::from_str(&self.kind)
    }

    /// Tags as a list. The column stores a JSON array; unreadable values
    /// degrade to no tags rather than failing the read.
    pub fn tag_list(&self) -> Vec<String> {
        serde_json::from_str(&self.tags).unwrap_or_default()
    }

    /// Comma-joined tag set, the form substring search runs against.
    pub fn joined_tags(&self) -> String {
        self.tag_list().join(",")
    }
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::clip_records)]
pub struct NewClipRecord {
    pub id: String,
    pub kind: String,
    pub content: String,
    pub display_name: Option<String>,
    pub signature: Option<String>,
    pub pinned: bool,
    pub tags: String,
    pub created_at: i64,
}

/// Metadata patch. `None` leaves a column untouched; `Some(None)` clears a
/// nullable column.
#[derive(AsChangeset, Debug, Default)]
#[diesel(table_name = crate::infrastructure::storage::db::schema::clip_records)]
pub struct UpdateClipRecord {
    pub content: Option<String>,
    pub display_name: Option<Option<String>>,
    pub pinned: Option<bool>,
    pub tags: Option<String>,
    pub border_color: Option<Option<String>>,
    pub background_color: Option<Option<String>>,
    pub updated_at: Option<i64>,
}
