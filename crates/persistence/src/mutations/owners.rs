// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::Owner;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::info;

use super::current_timestamp;
use crate::backend::PersistenceBackend;
use crate::diesel_schema::owners;
use crate::error::PersistenceError;

backend_fn! {
/// Registers an owner.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if `external_id` is taken,
/// or another error if the insert fails.
pub fn create_owner(
    conn: &mut _,
    external_id: &str,
    name: &str,
) -> Result<Owner, PersistenceError> {
    let created_at: String = current_timestamp()?;

    diesel::insert_into(owners::table)
        .values((
            owners::external_id.eq(external_id),
            owners::name.eq(name),
            owners::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let owner_id: i64 = conn.last_insert_id()?;

    info!(owner_id, external_id, "Owner created");

    Ok(Owner {
        owner_id,
        external_id: external_id.to_string(),
        name: name.to_string(),
    })
}
}
