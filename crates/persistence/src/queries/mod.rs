// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `owners`: owner lookups
//! - `documents`: document lookups and the ID scan used by allocation
//!
//! Every query is generated in `_sqlite` and `_mysql` versions; the
//! `Persistence` adapter in `lib.rs` dispatches on the active backend.

pub mod documents;
pub mod owners;

pub use documents::{
    get_document_mysql, get_document_sqlite, list_document_ids_with_prefix_mysql,
    list_document_ids_with_prefix_sqlite, list_documents_by_kind_mysql,
    list_documents_by_kind_sqlite,
};
pub use owners::{
    find_owner_by_external_id_mysql, find_owner_by_external_id_sqlite, list_owners_mysql,
    list_owners_sqlite,
};
