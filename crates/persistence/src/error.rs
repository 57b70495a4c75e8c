// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use atelier::StoreError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Errors raised by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The database rejected or failed a statement.
    DatabaseError(String),
    /// The connection could not be established.
    DatabaseConnectionFailed(String),
    /// An embedded migration failed to apply.
    MigrationFailed(String),
    /// A row violated a unique or primary-key constraint.
    UniqueViolation(String),
    /// The document ID was issued before and has since been retired.
    DocumentIdRetired(String),
    /// A stored row holds a kind or date this build cannot read.
    CorruptRow(String),
    /// The database path is not valid UTF-8.
    InvalidDatabasePath(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A timestamp could not be rendered.
    TimestampFormat(String),
}

impl PersistenceError {
    /// Whether the failure means the document ID is already taken.
    #[must_use]
    pub const fn is_id_conflict(&self) -> bool {
        matches!(self, Self::UniqueViolation(_) | Self::DocumentIdRetired(_))
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::DocumentIdRetired(id) => write!(f, "Document id {id} has been retired"),
            Self::CorruptRow(msg) => write!(f, "Stored row is unreadable: {msg}"),
            Self::InvalidDatabasePath(path) => write!(f, "Invalid database path: {path}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::TimestampFormat(msg) => write!(f, "Failed to format timestamp: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            other => Self::DatabaseError(other.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

/// Only ID collisions are worth retrying; everything else is an outage.
impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        if err.is_id_conflict() {
            Self::Conflict(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
