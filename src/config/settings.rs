//! Flat key-value settings persisted next to the clip records.
//!
//! Each field of `Settings` is one row in the `settings` table with a
//! JSON-encoded value. Unknown keys are ignored and missing keys take their
//! serde defaults, so old databases load cleanly after additive changes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::infrastructure::storage::db::dao::setting as dao;
use crate::infrastructure::storage::db::pool::DbPool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
    #[serde(rename = "system")]
    System,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::System
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Global accelerator that opens the history popup.
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_language")]
    pub language: String,
    /// Delay before the popup closes after a copy action, in milliseconds.
    #[serde(default = "default_close_on_copy_delay_ms")]
    pub close_on_copy_delay_ms: u64,
    #[serde(default)]
    pub launch_at_login: bool,
}

fn default_hotkey() -> String {
    "CmdOrCtrl+Shift+V".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_close_on_copy_delay_ms() -> u64 {
    300
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            theme: ThemeMode::System,
            language: default_language(),
            close_on_copy_delay_ms: default_close_on_copy_delay_ms(),
            launch_at_login: false,
        }
    }
}

impl Settings {
    /// Load settings from the database, applying defaults for missing keys.
    pub fn load(db: &DbPool) -> Result<Self> {
        let mut conn = db.get()?;
        let rows = dao::all_settings(&mut conn)?;

        let mut map = serde_json::Map::new();
        for row in rows {
            // Stored values are JSON; a value that fails to parse is kept as
            // a plain string rather than poisoning the whole load.
            let value =
                serde_json::from_str(&row.value).unwrap_or(Value::String(row.value.clone()));
            map.insert(row.key, value);
        }

        serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::config(format!("Failed to parse settings: {}", e)))
    }

    /// Persist every field as its own settings row.
    pub fn save(&self, db: &DbPool) -> Result<()> {
        let value = serde_json::to_value(self)?;
        let Value::Object(map) = value else {
            return Err(AppError::config("Settings did not serialize to an object"));
        };

        let mut conn = db.get()?;
        for (key, value) in map {
            dao::upsert_setting(&mut conn, &key, &value.to_string())?;
        }
        Ok(())
    }

    /// Seed defaults on first run, then load whatever is stored.
    pub fn seed(db: &DbPool) -> Result<Self> {
        let is_empty = {
            let mut conn = db.get()?;
            dao::settings_count(&mut conn)? == 0
        };
        if is_empty {
            Settings::default().save(db)?;
        }
        Settings::load(db)
    }
}
