// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::Date;
use time::macros::format_description;

/// Maximum length of a display name, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 200;

/// Maximum length of free-form notes, in characters.
pub const MAX_NOTES_LEN: usize = 2000;

/// Maximum length of an owner reference, in characters.
pub const MAX_OWNER_REFERENCE_LEN: usize = 255;

/// Maximum length of an owner's display name, in characters.
pub const MAX_OWNER_NAME_LEN: usize = 255;

/// Validates and normalizes a document display name.
///
/// Surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn validate_display_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidDisplayName(String::from(
            "Display name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(DomainError::InvalidDisplayName(format!(
            "Display name cannot exceed {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates an owner reference (the identity provider's subject).
///
/// # Errors
///
/// Returns an error if the reference is empty, too long, or contains
/// whitespace.
pub fn validate_owner_reference(owner_ref: &str) -> Result<(), DomainError> {
    if owner_ref.is_empty() {
        return Err(DomainError::InvalidOwnerReference(String::from(
            "Owner reference cannot be empty",
        )));
    }
    if owner_ref.chars().count() > MAX_OWNER_REFERENCE_LEN {
        return Err(DomainError::InvalidOwnerReference(format!(
            "Owner reference cannot exceed {MAX_OWNER_REFERENCE_LEN} characters"
        )));
    }
    if owner_ref.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidOwnerReference(String::from(
            "Owner reference cannot contain whitespace",
        )));
    }
    Ok(())
}

/// Validates and normalizes an owner's display name.
///
/// # Errors
///
/// Returns an error if the trimmed name is empty or too long.
pub fn validate_owner_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidOwnerName(String::from(
            "Owner name cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_OWNER_NAME_LEN {
        return Err(DomainError::InvalidOwnerName(format!(
            "Owner name cannot exceed {MAX_OWNER_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates optional notes. Blank notes become `None`.
///
/// # Errors
///
/// Returns an error if the notes are too long.
pub fn validate_notes(notes: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(notes) = notes.map(str::trim).filter(|n| !n.is_empty()) else {
        return Ok(None);
    };
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(DomainError::InvalidNotes(format!(
            "Notes cannot exceed {MAX_NOTES_LEN} characters"
        )));
    }
    Ok(Some(notes.to_string()))
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if the string is not a valid date.
pub fn parse_document_date(date_string: &str) -> Result<Date, DomainError> {
    Date::parse(date_string, format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: date_string.to_string(),
            error: e.to_string(),
        }
    })
}

/// Formats a date as ISO 8601 (`YYYY-MM-DD`).
#[must_use]
pub fn format_document_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
