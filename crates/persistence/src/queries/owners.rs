// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::Owner;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::diesel_schema::owners;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = owners)]
pub struct OwnerRow {
    pub owner_id: i64,
    pub external_id: String,
    pub name: String,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Self {
            owner_id: row.owner_id,
            external_id: row.external_id,
            name: row.name,
        }
    }
}

backend_fn! {
/// Looks up an owner by the identity provider's subject.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the owner is not found.
pub fn find_owner_by_external_id(
    conn: &mut _,
    external_id: &str,
) -> Result<Option<Owner>, PersistenceError> {
    debug!(external_id, "Looking up owner");

    let row: Option<OwnerRow> = owners::table
        .filter(owners::external_id.eq(external_id))
        .select(OwnerRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Owner::from))
}
}

backend_fn! {
/// Lists every owner ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_owners(conn: &mut _) -> Result<Vec<Owner>, PersistenceError> {
    let rows: Vec<OwnerRow> = owners::table
        .order(owners::owner_id.asc())
        .select(OwnerRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Owner::from).collect())
}
}
