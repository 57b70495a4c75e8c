// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A stored document ID does not carry a valid sequence after its prefix.
    ///
    /// The allocator absorbs this error; it never reaches a caller.
    MalformedId {
        /// The offending document ID.
        id: String,
        /// Why the suffix was rejected.
        reason: String,
    },
    /// The document type slug or code is not one of the known kinds.
    UnknownDocumentKind(String),
    /// Display name is empty or invalid.
    InvalidDisplayName(String),
    /// Owner reference is empty or invalid.
    InvalidOwnerReference(String),
    /// Owner name is empty or invalid.
    InvalidOwnerName(String),
    /// Notes field is invalid.
    InvalidNotes(String),
    /// Time zone name is not a known IANA zone.
    InvalidTimezone(String),
    /// Year or month outside the range a period can represent.
    InvalidPeriod {
        /// The year value.
        year: i32,
        /// The month value.
        month: u32,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedId { id, reason } => {
                write!(f, "Malformed document id '{id}': {reason}")
            }
            Self::UnknownDocumentKind(kind) => write!(f, "Unknown document type: {kind}"),
            Self::InvalidDisplayName(msg) => write!(f, "Invalid display name: {msg}"),
            Self::InvalidOwnerReference(msg) => write!(f, "Invalid owner reference: {msg}"),
            Self::InvalidOwnerName(msg) => write!(f, "Invalid owner name: {msg}"),
            Self::InvalidNotes(msg) => write!(f, "Invalid notes: {msg}"),
            Self::InvalidTimezone(name) => write!(f, "Invalid time zone: {name}"),
            Self::InvalidPeriod { year, month } => {
                write!(f, "Invalid period {year}-{month}: year must be 1000-9999, month 1-12")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
