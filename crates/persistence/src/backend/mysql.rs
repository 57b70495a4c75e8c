// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `MySQL`/`MariaDB` backend.
//!
//! Meant for deployments where several server processes share one
//! database, which is when the allocation retry loop actually matters.
//! It is exercised by the `#[ignore]` tests that `cargo xtask test-mariadb`
//! runs against a throwaway container, with `DATABASE_URL` and
//! `ATELIER_TEST_BACKEND` set.
//!
//! `migrations_mysql/` must describe the same schema as `migrations/`.
//! Document IDs are `VARCHAR(64)` with a binary collation: `MySQL` cannot
//! key on `TEXT`, and IDs must compare byte for byte.

use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, MysqlConnection, QueryableByName, RunQueryDsl};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::debug;

use super::PersistenceBackend;
use crate::error::PersistenceError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations_mysql");

#[derive(QueryableByName)]
struct ForeignKeyChecks {
    #[diesel(sql_type = Integer)]
    fk_checks: i32,
}

impl PersistenceBackend for MysqlConnection {
    const NAME: &'static str = "mysql";

    fn configure_session(&mut self) -> Result<(), PersistenceError> {
        // Display names and notes are French; the server default may be latin1.
        self.batch_execute("SET NAMES utf8mb4")?;
        Ok(())
    }

    fn apply_migrations(&mut self) -> Result<usize, PersistenceError> {
        self.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))
    }

    fn last_insert_id(&mut self) -> Result<i64, PersistenceError> {
        Ok(diesel::select(sql::<BigInt>("LAST_INSERT_ID()")).get_result(self)?)
    }

    // InnoDB takes row locks as statements run.
    fn write_transaction<T, F>(&mut self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>,
    {
        self.transaction(f)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        let checks: ForeignKeyChecks =
            diesel::sql_query("SELECT @@foreign_key_checks AS fk_checks").get_result(self)?;

        if checks.fk_checks != 1 {
            return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
        }
        debug!("MySQL foreign key enforcement is enabled");
        Ok(())
    }
}
