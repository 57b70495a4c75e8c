// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Period-scoped ID prefixes.
//!
//! A prefix is the part of a document ID shared by every document of one
//! kind created in one calendar month: type code, optional code separator,
//! four-digit year, `-`, two-digit month, `-`.
//!
//! The period is taken from the creation instant in the workshop's time
//! zone, never from a business date carried by the document.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::error::DomainError;
use crate::types::DocumentKind;

/// Separator between year and month, and between month and sequence.
pub const PERIOD_SEPARATOR: char = '-';

/// A calendar month in which documents are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPeriod` if the year is not four digits
    /// or the month is outside 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1000..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(DomainError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the period containing `instant` as observed in `timezone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the local year does not have four digits.
    pub fn at(instant: DateTime<Utc>, timezone: Tz) -> Result<Self, DomainError> {
        let local = instant.with_timezone(&timezone);
        Self::new(local.year(), local.month())
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{PERIOD_SEPARATOR}{:02}", self.year, self.month)
    }
}

/// The leading part of a document ID, up to and including the separator
/// that precedes the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPrefix(String);

impl DocumentPrefix {
    /// Builds the prefix for `kind` in `period`.
    #[must_use]
    pub fn build(kind: DocumentKind, period: Period) -> Self {
        let format = kind.format();
        Self(format!(
            "{}{}{period}{PERIOD_SEPARATOR}",
            format.type_code, format.code_separator
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the prefix in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for DocumentPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses an IANA time zone name such as `Europe/Paris`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the name is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}
