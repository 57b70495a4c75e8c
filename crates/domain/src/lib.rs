// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rules for document numbering.
//!
//! Every business document (order, invoice, delivery note, incoming
//! delivery note, production plan) is keyed by a human-readable ID of the
//! form `<TypeCode><sep><YYYY>-<MM>-<NNNN>`. This crate builds the
//! period-scoped prefix, parses existing sequences and computes the next
//! ID. It performs no I/O.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocator;
mod error;
mod prefix;
mod sequence;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use allocator::{allocate, next_sequence};
pub use error::DomainError;
pub use prefix::{DocumentPrefix, PERIOD_SEPARATOR, Period, parse_timezone};
pub use sequence::{SEQUENCE_WIDTH, format_sequence, parse_sequence};
pub use types::{Document, DocumentId, DocumentKind, KindFormat, Owner};
pub use validation::{
    MAX_DISPLAY_NAME_LEN, MAX_NOTES_LEN, MAX_OWNER_NAME_LEN, MAX_OWNER_REFERENCE_LEN,
    format_document_date, parse_document_date, validate_display_name, validate_notes,
    validate_owner_name, validate_owner_reference,
};
