// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document queries.
//!
//! The ID scan behind allocation reads both the live `documents` table and
//! the `retired_document_ids` ledger, so a deleted ID still counts as taken.

use atelier_domain::{Document, DocumentId, DocumentKind, parse_document_date};
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use time::Date;
use tracing::debug;

use crate::diesel_schema::{documents, owners, retired_document_ids};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = documents)]
pub struct DocumentRow {
    pub document_id: String,
    pub kind: String,
    pub owner_id: i64,
    pub display_name: String,
    pub document_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl DocumentRow {
    /// Converts a stored row into a `Document` owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if the stored kind or date is invalid.
    pub fn into_document(self, owner: String) -> Result<Document, PersistenceError> {
        let kind: DocumentKind = self
            .kind
            .parse()
            .map_err(|e| PersistenceError::CorruptRow(format!("{e}")))?;
        let document_date: Option<Date> = self
            .document_date
            .as_deref()
            .map(parse_document_date)
            .transpose()
            .map_err(|e| PersistenceError::CorruptRow(format!("{e}")))?;

        Ok(Document {
            id: DocumentId::new(self.document_id),
            kind,
            owner_id: self.owner_id,
            owner,
            display_name: self.display_name,
            document_date,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}

/// Returns the `LIKE` pattern matching every ID that starts with `prefix`.
///
/// Document prefixes never contain `%` or `_`.
fn prefix_pattern(prefix: &str) -> String {
    format!("{prefix}%")
}

backend_fn! {
/// Lists every ID ever issued under `prefix`, live or retired.
///
/// `LIKE` is case-insensitive on some backends, so callers must still
/// compare prefixes exactly.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_document_ids_with_prefix(
    conn: &mut _,
    prefix: &str,
) -> Result<Vec<String>, PersistenceError> {
    let pattern: String = prefix_pattern(prefix);

    let mut ids: Vec<String> = documents::table
        .filter(documents::document_id.like(&pattern))
        .select(documents::document_id)
        .load(conn)?;
    let retired: Vec<String> = retired_document_ids::table
        .filter(retired_document_ids::document_id.like(&pattern))
        .select(retired_document_ids::document_id)
        .load(conn)?;

    debug!(prefix, live = ids.len(), retired = retired.len(), "Scanned document ids");

    ids.extend(retired);
    Ok(ids)
}
}

backend_fn! {
/// Fetches one live document of `kind`.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no live document of that kind has the ID.
pub fn get_document(
    conn: &mut _,
    kind: DocumentKind,
    document_id: &str,
) -> Result<Option<Document>, PersistenceError> {
    debug!(%kind, document_id, "Fetching document");

    let row: Option<(DocumentRow, String)> = documents::table
        .inner_join(owners::table)
        .filter(documents::document_id.eq(document_id))
        .filter(documents::kind.eq(kind.as_str()))
        .select((DocumentRow::as_select(), owners::external_id))
        .first(conn)
        .optional()?;

    row.map(|(row, owner)| row.into_document(owner)).transpose()
}
}

backend_fn! {
/// Lists the live documents of `kind`, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is corrupt.
pub fn list_documents_by_kind(
    conn: &mut _,
    kind: DocumentKind,
) -> Result<Vec<Document>, PersistenceError> {
    let rows: Vec<(DocumentRow, String)> = documents::table
        .inner_join(owners::table)
        .filter(documents::kind.eq(kind.as_str()))
        .order(documents::document_id.asc())
        .select((DocumentRow::as_select(), owners::external_id))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, owner)| row.into_document(owner))
        .collect()
}
}
