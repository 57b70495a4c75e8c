// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document creation: prefix, allocation and persistence with retry.
//!
//! ## Concurrency contract
//!
//! Two requests for the same prefix can read the same set of existing
//! IDs and compute the same next ID. No lock is taken here. The store's
//! primary-key constraint lets exactly one insert win; the loser gets
//! `StoreError::Conflict`, re-reads the IDs and allocates again, up to
//! `max_attempts` times.

use atelier_domain::{
    Document, DocumentId, DocumentKind, DocumentPrefix, Owner, Period, allocate,
    validate_display_name, validate_notes, validate_owner_reference,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use time::Date;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::{CoreError, StoreError};
use crate::store::{DocumentStore, NewDocument};

/// Allocation attempts per request when not configured otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// A request to create a document of some kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocument {
    /// The owner's external identifier.
    pub owner: String,
    pub display_name: String,
    pub document_date: Option<Date>,
    pub notes: Option<String>,
}

/// Creates documents with freshly allocated IDs.
#[derive(Debug, Clone)]
pub struct DocumentService {
    timezone: Tz,
    max_attempts: u32,
}

impl Default for DocumentService {
    fn default() -> Self {
        Self::new(Tz::UTC, DEFAULT_MAX_ATTEMPTS)
    }
}

impl DocumentService {
    /// Creates a service numbering documents by calendar month in `timezone`.
    ///
    /// `max_attempts` is clamped to at least 1.
    #[must_use]
    pub fn new(timezone: Tz, max_attempts: u32) -> Self {
        Self {
            timezone,
            max_attempts: max_attempts.max(1),
        }
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the prefix `kind` documents created at `now` are numbered under.
    ///
    /// # Errors
    ///
    /// Returns an error if the local year of `now` has no four-digit form.
    pub fn prefix_for(
        &self,
        kind: DocumentKind,
        now: DateTime<Utc>,
    ) -> Result<DocumentPrefix, CoreError> {
        let period: Period = Period::at(now, self.timezone)?;
        Ok(DocumentPrefix::build(kind, period))
    }

    /// Creates a document of `kind` and returns it with its allocated ID.
    ///
    /// The owner is resolved once. The prefix is computed once, from the
    /// clock reading at the start of the call, and reused by every retry.
    ///
    /// # Errors
    ///
    /// - `CoreError::DomainViolation` if the request fails validation
    /// - `CoreError::OwnerNotFound` if the owner does not exist
    /// - `CoreError::AllocationConflict` if every attempt collided
    /// - `CoreError::StoreUnavailable` if the store fails
    pub fn create<S, C>(
        &self,
        store: &mut S,
        clock: &C,
        kind: DocumentKind,
        request: CreateDocument,
    ) -> Result<Document, CoreError>
    where
        S: DocumentStore + ?Sized,
        C: Clock + ?Sized,
    {
        validate_owner_reference(&request.owner)?;
        let display_name: String = validate_display_name(&request.display_name)?;
        let notes: Option<String> = validate_notes(request.notes.as_deref())?;

        let owner: Owner = store
            .find_owner(&request.owner)?
            .ok_or_else(|| CoreError::OwnerNotFound(request.owner.clone()))?;

        let prefix: DocumentPrefix = self.prefix_for(kind, clock.now())?;

        for attempt in 1..=self.max_attempts {
            let existing: Vec<String> = store.list_document_ids(&prefix)?;
            let id: DocumentId = allocate(&existing, &prefix);
            debug!(
                %kind,
                %prefix,
                existing = existing.len(),
                %id,
                attempt,
                "Allocated document id"
            );

            let new_document: NewDocument = NewDocument {
                id,
                kind,
                owner_id: owner.owner_id,
                display_name: display_name.clone(),
                document_date: request.document_date,
                notes: notes.clone(),
            };

            match store.insert_document(&new_document) {
                Ok(document) => {
                    info!(
                        %kind,
                        id = %document.id,
                        owner_id = owner.owner_id,
                        attempt,
                        "Created document"
                    );
                    return Ok(document);
                }
                Err(StoreError::Conflict(msg)) => {
                    warn!(
                        %kind,
                        id = %new_document.id,
                        attempt,
                        max_attempts = self.max_attempts,
                        reason = %msg,
                        "Document id taken by a concurrent request"
                    );
                }
                Err(StoreError::Unavailable(msg)) => {
                    return Err(CoreError::StoreUnavailable(msg));
                }
            }
        }

        Err(CoreError::AllocationConflict {
            prefix: prefix.to_string(),
            attempts: self.max_attempts,
        })
    }
}
