// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence boundary of the creation service.

use atelier_domain::{Document, DocumentId, DocumentKind, DocumentPrefix, Owner};
use time::Date;

use crate::error::StoreError;

/// A fully validated document ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub owner_id: i64,
    pub display_name: String,
    pub document_date: Option<Date>,
    pub notes: Option<String>,
}

/// Storage operations the creation service depends on.
///
/// Implementations must enforce uniqueness of `DocumentId` at insert time
/// and report a collision as `StoreError::Conflict`. IDs of deleted
/// documents must keep colliding and must keep being listed, otherwise
/// the allocator would hand them out again.
pub trait DocumentStore {
    /// Looks up an owner by the identity provider's subject.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the lookup fails.
    fn find_owner(&mut self, owner_ref: &str) -> Result<Option<Owner>, StoreError>;

    /// Lists every ID ever issued under `prefix`, live or retired, in any order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the query fails.
    fn list_document_ids(&mut self, prefix: &DocumentPrefix) -> Result<Vec<String>, StoreError>;

    /// Inserts a document atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the ID is taken, or
    /// `StoreError::Unavailable` for any other failure.
    fn insert_document(&mut self, document: &NewDocument) -> Result<Document, StoreError>;
}
