// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sequence suffix parsing and formatting.
//!
//! ## Accepted suffixes
//!
//! - exactly [`SEQUENCE_WIDTH`] ASCII digits, leading zeros allowed (`0001`)
//! - more digits only in the width-expanded form produced once a month
//!   passes 9999 documents: no leading zero (`10000`, `10001`, ...)
//!
//! Anything else, including `0000`, is malformed.

use crate::error::DomainError;

/// Minimum number of digits in a formatted sequence.
pub const SEQUENCE_WIDTH: usize = 4;

/// Parses the sequence number that follows a prefix of `prefix_len` bytes.
///
/// # Errors
///
/// Returns `DomainError::MalformedId` if the ID is shorter than the prefix,
/// or the suffix is not a canonical sequence.
pub fn parse_sequence(id: &str, prefix_len: usize) -> Result<u32, DomainError> {
    let malformed = |reason: &str| DomainError::MalformedId {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    let suffix: &str = id
        .get(prefix_len..)
        .ok_or_else(|| malformed("shorter than its prefix"))?;

    if suffix.len() < SEQUENCE_WIDTH {
        return Err(malformed("sequence has fewer than 4 digits"));
    }
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed("sequence is not numeric"));
    }
    if suffix.len() > SEQUENCE_WIDTH && suffix.starts_with('0') {
        return Err(malformed("expanded sequence has a leading zero"));
    }

    let value: u32 = suffix
        .parse()
        .map_err(|_| malformed("sequence is out of range"))?;

    match value {
        0 => Err(malformed("sequence starts at 0001")),
        // No successor can be allocated after this value.
        u32::MAX => Err(malformed("sequence is out of range")),
        _ => Ok(value),
    }
}

/// Formats a sequence zero-padded to [`SEQUENCE_WIDTH`] digits.
///
/// Values that need more digits are written in full rather than truncated.
#[must_use]
pub fn format_sequence(sequence: u32) -> String {
    format!("{sequence:0width$}", width = SEQUENCE_WIDTH)
}
