// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use atelier::CoreError;
use atelier_domain::DomainError;
use atelier_persistence::PersistenceError;

/// Failures as the API contract names them.
///
/// Every lower-layer error is translated into one of these explicitly; the
/// server maps each variant to one status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request is well-formed but breaks a numbering rule.
    DomainRuleViolation {
        /// Machine-readable rule name.
        rule: String,
        /// What went wrong.
        message: String,
    },
    /// A request field failed validation.
    InvalidInput {
        /// Request field name.
        field: String,
        /// Why it was rejected.
        message: String,
    },
    /// An owner or document does not exist.
    ResourceNotFound {
        /// `User` or `Document`.
        resource_type: String,
        /// Which one was looked up.
        message: String,
    },
    /// The route named a document type that does not exist.
    UnknownDocumentType {
        /// The path segment that was requested.
        slug: String,
    },
    /// A uniqueness constraint rejected the write.
    Conflict {
        resource_type: String,
        message: String,
    },
    /// Allocation gave up, the store failed, or stored data is unreadable.
    Internal {
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => write!(f, "[{rule}] {message}"),
            Self::InvalidInput { field, message } => write!(f, "{field}: {message}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => write!(f, "{resource_type} not found ({message})"),
            Self::UnknownDocumentType { slug } => write!(f, "No document type is served at /{slug}"),
            Self::Conflict {
                resource_type,
                message,
            } => write!(f, "{resource_type} conflict: {message}"),
            Self::Internal { message } => f.write_str(message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Maps a validation or numbering failure to the field or rule it concerns.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::UnknownDocumentKind(slug) => ApiError::UnknownDocumentType { slug },
        DomainError::InvalidDisplayName(msg) => ApiError::InvalidInput {
            field: String::from("display_name"),
            message: msg,
        },
        DomainError::InvalidOwnerReference(msg) => ApiError::InvalidInput {
            field: String::from("owner"),
            message: msg,
        },
        DomainError::InvalidOwnerName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidNotes(msg) => ApiError::InvalidInput {
            field: String::from("notes"),
            message: msg,
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("document_date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::InvalidPeriod { year, month } => ApiError::DomainRuleViolation {
            rule: String::from("four_digit_period"),
            message: format!("Cannot number documents in period {year}-{month}"),
        },
        err @ (DomainError::MalformedId { .. } | DomainError::InvalidTimezone(_)) => {
            ApiError::Internal {
                message: err.to_string(),
            }
        }
    }
}

/// Maps a creation-service failure. An unknown owner is a missing `User`.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::OwnerNotFound(owner) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("No owner is registered as '{owner}'"),
        },
        err @ CoreError::AllocationConflict { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        CoreError::StoreUnavailable(msg) => ApiError::Internal {
            message: format!("Store unavailable: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Document ID collisions are handled by the creation service, so the only
/// unique violation that reaches the API is a duplicate owner.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(msg) => ApiError::Conflict {
            resource_type: String::from("Owner"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
