use anyhow::{Context, Result};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::infrastructure::storage::db::models::setting::DbSetting;
use crate::infrastructure::storage::db::schema::settings;

pub fn get_setting(conn: &mut SqliteConnection, key: &str) -> Result<Option<String>> {
    let value = settings::table
        .find(key)
        .select(settings::value)
        .first(conn)
        .optional()
        .context("Failed to get setting")?;
    Ok(value)
}

pub fn upsert_setting(conn: &mut SqliteConnection, key: &str, value: &str) -> Result<()> {
    let row = DbSetting {
        key: key.to_string(),
        value: value.to_string(),
    };
    diesel::insert_into(settings::table)
        .values(&row)
        .on_conflict(settings::key)
        .do_update()
        .set(settings::value.eq(value))
        .execute(conn)
        .context("Failed to upsert setting")?;
    Ok(())
}

pub fn all_settings(conn: &mut SqliteConnection) -> Result<Vec<DbSetting>> {
    let rows = settings::table
        .select(DbSetting::as_select())
        .load(conn)
        .context("Failed to load settings")?;
    Ok(rows)
}

pub fn settings_count(conn: &mut SqliteConnection) -> Result<i64> {
    let count = settings::table
        .count()
        .get_result(conn)
        .context("Failed to count settings")?;
    Ok(count)
}
