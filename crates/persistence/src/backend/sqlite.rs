// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` backend.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::debug;

use super::PersistenceBackend;
use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// How long a writer waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

impl PersistenceBackend for SqliteConnection {
    const NAME: &'static str = "sqlite";

    fn configure_session(&mut self) -> Result<(), PersistenceError> {
        self.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            BUSY_TIMEOUT.as_millis()
        ))?;
        Ok(())
    }

    fn apply_migrations(&mut self) -> Result<usize, PersistenceError> {
        self.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))
    }

    fn last_insert_id(&mut self) -> Result<i64, PersistenceError> {
        Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(self)?)
    }

    // A deferred transaction that reads first gets SQLITE_BUSY without
    // waiting on `busy_timeout` when another writer holds the WAL lock.
    fn write_transaction<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>,
    {
        self.immediate_transaction(f)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        let pragma: ForeignKeysPragma =
            diesel::sql_query("PRAGMA foreign_keys").get_result(self)?;

        if pragma.foreign_keys == 0 {
            return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
        }
        debug!("SQLite foreign key enforcement is enabled");
        Ok(())
    }
}

/// Switches a file database to write-ahead logging so readers do not
/// block the writer. In-memory databases keep their default journal.
///
/// # Errors
///
/// Returns an error if the PRAGMA fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    conn.batch_execute("PRAGMA journal_mode = WAL")?;
    Ok(())
}
