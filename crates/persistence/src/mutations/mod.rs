// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `owners`: owner registration
//! - `documents`: document insert, update and retirement
//!
//! Mutations that touch more than one table run in a single transaction.

pub mod documents;
pub mod owners;

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::PersistenceError;

pub use documents::{
    delete_document_mysql, delete_document_sqlite, insert_document_mysql, insert_document_sqlite,
    update_document_mysql, update_document_sqlite,
};
pub use owners::{create_owner_mysql, create_owner_sqlite};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Formats the current UTC time the way every `*_at` column stores it.
fn current_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::TimestampFormat(e.to_string()))
}
