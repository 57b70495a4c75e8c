// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document mutations.
//!
//! Deleting a document moves its ID into `retired_document_ids`, and
//! inserting refuses any retired ID, so an ID is issued at most once.

use atelier::NewDocument;
use atelier_domain::{Document, DocumentKind, format_document_date};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::{debug, info};

use super::current_timestamp;
use crate::backend::PersistenceBackend;
use crate::data_models::DocumentChanges;
use crate::diesel_schema::{documents, owners, retired_document_ids};
use crate::error::PersistenceError;
use crate::queries::documents::DocumentRow;

#[derive(AsChangeset)]
#[diesel(table_name = documents)]
struct DocumentChangeset {
    display_name: Option<String>,
    document_date: Option<Option<String>>,
    notes: Option<Option<String>>,
}

impl From<&DocumentChanges> for DocumentChangeset {
    fn from(changes: &DocumentChanges) -> Self {
        Self {
            display_name: changes.display_name.clone(),
            document_date: changes
                .document_date
                .map(|date| date.map(format_document_date)),
            notes: changes.notes.clone(),
        }
    }
}

backend_fn! {
/// Inserts a document under its pre-allocated ID.
///
/// # Errors
///
/// - `PersistenceError::UniqueViolation` if a live document has the ID
/// - `PersistenceError::DocumentIdRetired` if the ID was retired
/// - another error if the insert fails
pub fn insert_document(
    conn: &mut _,
    document: &NewDocument,
) -> Result<Document, PersistenceError> {
    let created_at: String = current_timestamp()?;
    let document_id: &str = document.id.as_str();

    conn.write_transaction(|conn| {
        let retired: bool = diesel::select(diesel::dsl::exists(
            retired_document_ids::table.filter(retired_document_ids::document_id.eq(document_id)),
        ))
        .get_result(conn)?;
        if retired {
            return Err(PersistenceError::DocumentIdRetired(document_id.to_string()));
        }

        let owner: String = owners::table
            .filter(owners::owner_id.eq(document.owner_id))
            .select(owners::external_id)
            .first(conn)?;

        diesel::insert_into(documents::table)
            .values((
                documents::document_id.eq(document_id),
                documents::kind.eq(document.kind.as_str()),
                documents::owner_id.eq(document.owner_id),
                documents::display_name.eq(&document.display_name),
                documents::document_date.eq(document.document_date.map(format_document_date)),
                documents::notes.eq(document.notes.as_deref()),
                documents::created_at.eq(&created_at),
            ))
            .execute(conn)?;

        debug!(document_id, "Inserted document row");

        Ok(Document {
            id: document.id.clone(),
            kind: document.kind,
            owner_id: document.owner_id,
            owner,
            display_name: document.display_name.clone(),
            document_date: document.document_date,
            notes: document.notes.clone(),
            created_at,
        })
    })
}
}

backend_fn! {
/// Applies `changes` to a live document of `kind`.
///
/// The ID and kind never change.
///
/// # Errors
///
/// Returns an error if the update fails.
/// Returns `Ok(None)` if no live document of that kind has the ID.
pub fn update_document(
    conn: &mut _,
    kind: DocumentKind,
    document_id: &str,
    changes: &DocumentChanges,
) -> Result<Option<Document>, PersistenceError> {
    conn.write_transaction(|conn| {
        // Diesel rejects an empty changeset.
        if !changes.is_empty() {
            diesel::update(
                documents::table
                    .filter(documents::document_id.eq(document_id))
                    .filter(documents::kind.eq(kind.as_str())),
            )
            .set(DocumentChangeset::from(changes))
            .execute(conn)?;
        }

        let row: Option<(DocumentRow, String)> = documents::table
            .inner_join(owners::table)
            .filter(documents::document_id.eq(document_id))
            .filter(documents::kind.eq(kind.as_str()))
            .select((DocumentRow::as_select(), owners::external_id))
            .first(conn)
            .optional()?;

        if row.is_some() && !changes.is_empty() {
            info!(%kind, document_id, "Document updated");
        }

        row.map(|(row, owner)| row.into_document(owner)).transpose()
    })
}
}

backend_fn! {
/// Deletes a live document of `kind` and retires its ID.
///
/// # Errors
///
/// Returns an error if the delete fails.
/// Returns `Ok(false)` if no live document of that kind has the ID.
pub fn delete_document(
    conn: &mut _,
    kind: DocumentKind,
    document_id: &str,
) -> Result<bool, PersistenceError> {
    let retired_at: String = current_timestamp()?;

    conn.write_transaction(|conn| {
        let deleted: usize = diesel::delete(
            documents::table
                .filter(documents::document_id.eq(document_id))
                .filter(documents::kind.eq(kind.as_str())),
        )
        .execute(conn)?;
        if deleted == 0 {
            return Ok(false);
        }

        diesel::insert_into(retired_document_ids::table)
            .values((
                retired_document_ids::document_id.eq(document_id),
                retired_document_ids::kind.eq(kind.as_str()),
                retired_document_ids::retired_at.eq(&retired_at),
            ))
            .execute(conn)?;

        info!(%kind, document_id, "Document deleted and id retired");
        Ok(true)
    })
}
}
