// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backends.
//!
//! A backend knows how to open, configure and migrate a connection, and
//! answers the two questions the Diesel DSL cannot: which key the last
//! insert generated, and whether foreign keys are enforced. Owner and
//! document SQL is shared and lives in `queries/` and `mutations/`.

pub mod mysql;
pub mod sqlite;

use diesel::Connection;
use tracing::info;

use crate::error::PersistenceError;

/// Backend-specific connection behavior.
pub trait PersistenceBackend: Connection {
    /// Short name used in log fields.
    const NAME: &'static str;

    /// Applies per-session settings right after connecting.
    ///
    /// # Errors
    ///
    /// Returns an error if a setting is rejected.
    fn configure_session(&mut self) -> Result<(), PersistenceError>;

    /// Applies the backend's pending migrations, returning how many ran.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::MigrationFailed` if a migration fails.
    fn apply_migrations(&mut self) -> Result<usize, PersistenceError>;

    /// Retrieves the auto-increment key generated by the last insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn last_insert_id(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` if it is off.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Runs `f` in a transaction that holds the write lock from its first
    /// statement, so a read-then-write body cannot fail to upgrade.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or an error if the transaction
    /// cannot begin or commit.
    fn write_transaction<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>;

    /// Connects, configures the session, migrates, then checks foreign keys.
    ///
    /// # Errors
    ///
    /// Returns an error if any of those steps fails.
    fn open(database_url: &str) -> Result<Self, PersistenceError> {
        let mut conn: Self = Self::establish(database_url)?;
        conn.configure_session()?;

        let applied: usize = conn.apply_migrations()?;
        info!(backend = Self::NAME, applied, "Database ready");

        conn.verify_foreign_key_enforcement()?;
        Ok(conn)
    }
}
