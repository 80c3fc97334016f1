//! Headless runner: watches the OS clipboard and persists history until
//! interrupted. The desktop shell embeds the library directly; this binary
//! exists for development and manual testing.

use std::sync::Arc;

use log::info;

use clipkeep::config::get_database_path;
use clipkeep::infrastructure::clipboard::RsClipboard;
use clipkeep::infrastructure::storage::db::pool::DbPool;
use clipkeep::ClipboardHistoryService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    clipkeep::utils::logging::init();

    let db_path = get_database_path()?;
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    info!("opening clip database at {}", db_path.display());
    let db = Arc::new(DbPool::new(&db_path)?);

    let service = ClipboardHistoryService::new(Arc::new(RsClipboard::new()), db);
    service.subscribe(|| info!("clip history changed"));
    service.start()?;

    tokio::signal::ctrl_c().await?;
    service.stop();
    Ok(())
}
