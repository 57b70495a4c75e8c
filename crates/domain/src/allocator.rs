// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Next-ID computation for a prefix.
//!
//! The allocator is a pure function of the IDs it is shown. It does not
//! assume the input is sorted and it does not count: the next sequence is
//! the largest parsed sequence plus one, so gaps left by deletions are
//! never filled.
//!
//! Uniqueness across concurrent callers is not the allocator's job. The
//! caller persists the result under a primary-key constraint and retries
//! the read-allocate-write cycle on conflict.

use tracing::debug;

use crate::prefix::DocumentPrefix;
use crate::sequence::{format_sequence, parse_sequence};
use crate::types::DocumentId;

/// Computes the next sequence number under `prefix`.
///
/// IDs that do not start with `prefix` (exact, case-sensitive) are ignored.
/// Matching IDs with a malformed suffix are excluded from the maximum.
/// Returns 1 when nothing valid matches.
pub fn next_sequence<I>(existing_ids: I, prefix: &DocumentPrefix) -> u32
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    existing_ids
        .into_iter()
        .filter_map(|id| {
            let id: &str = id.as_ref();
            if !id.starts_with(prefix.as_str()) {
                return None;
            }
            match parse_sequence(id, prefix.len()) {
                Ok(sequence) => Some(sequence),
                Err(err) => {
                    debug!(%err, "Ignoring malformed document id");
                    None
                }
            }
        })
        .max()
        // parse_sequence rejects u32::MAX, so this cannot overflow
        .map_or(1, |max| max + 1)
}

/// Allocates the next document ID under `prefix`.
pub fn allocate<I>(existing_ids: I, prefix: &DocumentPrefix) -> DocumentId
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let sequence: u32 = next_sequence(existing_ids, prefix);
    DocumentId::new(format!("{prefix}{}", format_sequence(sequence)))
}
