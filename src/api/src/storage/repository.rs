//! SQLite-backed sports events repository.
//!
//! The repository owns an r2d2 pool for its whole lifetime. `init` and
//! every `list` check a connection out of it; `close` drops the pool.

use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params_from_iter;
use tracing::{debug, info};

use super::error::{InitError, RepoError, Result};
use super::filter::compile;
use super::mapper::scan_events;
use super::queries::EventsQuery;
use super::schema::create_tables;
use super::seed::Seeder;
use crate::types::{Event, ListEventsRequestFilter};

/// Read access to sports events
pub trait SportsRepo: Send + Sync {
    /// Prepare the repository. Seeding runs at most once per instance.
    fn init(&self) -> Result<()>;

    /// List events matching `filter`; `None` lists everything.
    fn list(&self, filter: Option<&ListEventsRequestFilter>) -> Result<Vec<Event>>;
}

/// Pool settings for a file-backed repository
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum open connections
    pub max_size: u32,
    /// How long a caller waits for a free connection
    pub connection_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 8,
            connection_timeout: Duration::from_secs(5),
        }
    }
}

/// Repository over the `sports` table
pub struct SqliteSportsRepo {
    pool: Pool<SqliteConnectionManager>,
    seeder: Box<dyn Seeder>,
    /// Outcome of the first `init`. A failed seed stays failed: later
    /// callers get the same `InitError` and seeding is never retried. If
    /// the seeder panics the cell stays empty and the next caller re-runs it.
    init: OnceLock<std::result::Result<(), InitError>>,
}

impl SqliteSportsRepo {
    /// Open (creating if needed) a database file
    pub fn open(db_path: &Path, seeder: impl Seeder + 'static) -> Result<Self> {
        Self::open_with(db_path, seeder, PoolConfig::default())
    }

    /// Open a database file with explicit pool settings
    pub fn open_with(
        db_path: &Path,
        seeder: impl Seeder + 'static,
        config: PoolConfig,
    ) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| RepoError::Directory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(SqliteConnectionManager::file(db_path))
            .map_err(RepoError::Connection)?;

        debug!(
            "Opened {} with up to {} connections",
            db_path.display(),
            config.max_size
        );
        Ok(Self::with_pool(pool, Box::new(seeder)))
    }

    /// Private in-memory database, dropped with the repository.
    ///
    /// Every in-memory connection is its own database, so the pool holds a
    /// single connection that is never recycled.
    pub fn in_memory(seeder: impl Seeder + 'static) -> Result<Self> {
        let config = PoolConfig::default();
        let pool = Pool::builder()
            .max_size(1)
            .max_lifetime(None)
            .idle_timeout(None)
            .connection_timeout(config.connection_timeout)
            .build(SqliteConnectionManager::memory())
            .map_err(RepoError::Connection)?;

        Ok(Self::with_pool(pool, Box::new(seeder)))
    }

    fn with_pool(pool: Pool<SqliteConnectionManager>, seeder: Box<dyn Seeder>) -> Self {
        Self {
            pool,
            seeder,
            init: OnceLock::new(),
        }
    }

    /// Release every pooled connection. In-memory databases are discarded.
    pub fn close(self) {
        let state = self.pool.state();
        debug!(
            "Closing sports database ({} connections, {} idle)",
            state.connections, state.idle_connections
        );
        drop(self.pool);
    }

    fn seed(&self) -> std::result::Result<(), InitError> {
        info!("Seeding sports database");

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        create_tables(&tx)?;
        self.seeder.seed(&tx)?;
        tx.commit()?;

        info!("Sports database seeded");
        Ok(())
    }
}

impl SportsRepo for SqliteSportsRepo {
    fn init(&self) -> Result<()> {
        self.init
            .get_or_init(|| self.seed())
            .clone()
            .map_err(RepoError::from)
    }

    fn list(&self, filter: Option<&ListEventsRequestFilter>) -> Result<Vec<Event>> {
        let query = compile(EventsQuery::List.sql(), filter);
        debug!("Listing events: {} ({} bound args)", query.sql, query.args.len());

        let conn = self.pool.get().map_err(RepoError::Connection)?;
        let mut stmt = conn.prepare(&query.sql).map_err(RepoError::Query)?;
        let rows = stmt
            .query(params_from_iter(query.args.iter()))
            .map_err(RepoError::Query)?;

        scan_events(rows)
    }
}
