//! SQLite connection pool with embedded migrations.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;
pub type SqlitePooledConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// WAL keeps readers unblocked during poller writes; the busy timeout
/// serializes the remaining writer contention. Applied per connection since
/// `busy_timeout` is connection-local.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub struct DbPool {
    pool: SqlitePool,
}

impl DbPool {
    /// Open (or create) the database at `database_path`, run pending
    /// migrations and configure SQLite for serialized concurrent access.
    pub fn new(database_path: &Path) -> Result<Self> {
        let manager =
            ConnectionManager::<SqliteConnection>::new(database_path.to_string_lossy().as_ref());
        let pool = Pool::builder()
            .max_size(8)
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)
            .context("Failed to build SQLite connection pool")?;

        let mut conn = pool.get().context("Failed to get initial connection")?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;

        Ok(Self { pool })
    }

    pub fn get(&self) -> Result<SqlitePooledConnection> {
        self.pool
            .get()
            .context("Failed to get database connection from pool")
    }
}
