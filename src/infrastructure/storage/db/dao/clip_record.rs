use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::infrastructure::storage::db::models::clip_record::{
    DbClipRecord, NewClipRecord, UpdateClipRecord,
};
use crate::infrastructure::storage::db::schema::clip_records;
use crate::payload::ClipKind;

/// Insert one clip record.
pub fn insert_clip_record(conn: &mut SqliteConnection, record: &NewClipRecord) -> Result<()> {
    diesel::insert_into(clip_records::table)
        .values(record)
        .execute(conn)
        .context("Failed to insert clip record")?;
    Ok(())
}

/// Find the text record with exactly this content, if any. Text dedup is
/// case-sensitive exact equality.
pub fn find_text_record(conn: &mut SqliteConnection, text: &str) -> Result<Option<DbClipRecord>> {
    let record = clip_records::table
        .filter(clip_records::kind.eq(ClipKind::Text.as_str()))
        .filter(clip_records::content.eq(text))
        .select(DbClipRecord::as_select())
        .first(conn)
        .optional()
        .context("Failed to look up text record by content")?;
    Ok(record)
}

/// The most recent image records, newest first. This is the bounded window
/// image dedup scans.
pub fn recent_image_records(
    conn: &mut SqliteConnection,
    window: i64,
) -> Result<Vec<DbClipRecord>> {
    let records = clip_records::table
        .filter(clip_records::kind.eq(ClipKind::Image.as_str()))
        .order(clip_records::created_at.desc())
        .limit(window)
        .select(DbClipRecord::as_select())
        .load(conn)
        .context("Failed to query recent image records")?;
    Ok(records)
}

/// Apply a metadata patch. Returns the number of rows affected; patching a
/// missing id affects zero rows and is not an error.
pub fn update_clip_record(
    conn: &mut SqliteConnection,
    id: &str,
    update: &UpdateClipRecord,
) -> Result<usize> {
    let affected = diesel::update(clip_records::table.find(id))
        .set(update)
        .execute(conn)
        .context("Failed to update clip record")?;
    Ok(affected)
}

pub fn get_clip_record_by_id(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<DbClipRecord>> {
    let record = clip_records::table
        .find(id)
        .select(DbClipRecord::as_select())
        .first(conn)
        .optional()
        .context("Failed to get clip record by id")?;
    Ok(record)
}

/// Delete by id. Zero rows affected means the id was already gone.
pub fn delete_clip_record(conn: &mut SqliteConnection, id: &str) -> Result<usize> {
    let affected = diesel::delete(clip_records::table.find(id))
        .execute(conn)
        .context("Failed to delete clip record")?;
    Ok(affected)
}

pub fn clear_all_records(conn: &mut SqliteConnection) -> Result<usize> {
    let count = diesel::delete(clip_records::table)
        .execute(conn)
        .context("Failed to clear all clip records")?;
    Ok(count)
}

pub fn get_record_count(conn: &mut SqliteConnection) -> Result<i64> {
    let count = clip_records::table
        .count()
        .get_result(conn)
        .context("Failed to get record count")?;
    Ok(count)
}

/// Ranked read: pinned records first, then newest first, capped at `limit`.
pub fn query_clip_records(conn: &mut SqliteConnection, limit: i64) -> Result<Vec<DbClipRecord>> {
    let records = clip_records::table
        .order((clip_records::pinned.desc(), clip_records::created_at.desc()))
        .limit(limit)
        .select(DbClipRecord::as_select())
        .load(conn)
        .context("Failed to query clip records")?;
    Ok(records)
}
