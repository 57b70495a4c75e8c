// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier_domain::DomainError;
use thiserror::Error;

/// Failures reported by a `DocumentStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The document ID is already taken, live or retired.
    #[error("Document id already taken: {0}")]
    Conflict(String),
    /// The store could not complete the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur while creating a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The referenced owner does not exist.
    #[error("Owner not found: {0}")]
    OwnerNotFound(String),
    /// Every allocation attempt collided with a concurrent insert.
    #[error("Could not allocate a unique id under '{prefix}' after {attempts} attempts")]
    AllocationConflict {
        /// The prefix being allocated under.
        prefix: String,
        /// How many allocate-then-persist attempts were made.
        attempts: u32,
    },
    /// The store failed for infrastructure reasons. Not retried.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        // Only inserts report conflicts, and the service handles those itself.
        match err {
            StoreError::Conflict(msg) | StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
        }
    }
}
