//! Store layer: connection handling, schema, row types and the DAOs.
//!
//! The tool runs one interactive session at a time, so the database is a
//! single owned `SqliteConnection` rather than a pool. Migrations are
//! embedded in the binary and applied on open.

pub mod error;
pub mod menu_dao;
pub mod models;
pub mod schema;
pub mod user_dao;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub use error::{MutationOutcome, StoreError};
pub use menu_dao::{MenuDao, MenuSearchFilter};
pub use models::{Menu, MenuPatch, MenuSearchRow, UserPatch, UserRecord, UserSummary};
pub use user_dao::UserDao;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Handle to the SQLite database backing the tool.
pub struct Database {
    conn: SqliteConnection,
}

impl Database {
    /// Open (creating if necessary) the database at `database_url` and bring
    /// its schema up to date.
    pub fn open(database_url: &str) -> Result<Self, StoreError> {
        let mut conn = SqliteConnection::establish(database_url)?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::Migration(e.to_string()))?;
        if !applied.is_empty() {
            info!(count = applied.len(), "applied pending migrations");
        }
        Ok(Self { conn })
    }

    /// Ephemeral database for tests and dry runs; contents vanish on drop.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}
