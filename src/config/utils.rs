use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::utils::env::is_development;

/// Data directory for the clip database.
///
/// Development and production use separate directories so test data never
/// mixes with real history.
pub fn get_data_dir() -> Result<PathBuf> {
    let base_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;

    let data_dir = if is_development() {
        base_dir.join("clipkeep-dev")
    } else {
        base_dir.join("clipkeep")
    };

    Ok(data_dir)
}

/// Path of the SQLite database file.
///
/// `CLIPKEEP_DB_PATH` overrides the default location.
pub fn get_database_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("CLIPKEEP_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    let data_dir = get_data_dir()?;
    Ok(data_dir.join("clipkeep.db"))
}
