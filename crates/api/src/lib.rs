// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Atelier document service.
//!
//! Translates request DTOs into domain calls and domain, core and
//! persistence errors into `ApiError`. Transport concerns live in the
//! server crate.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    create_document, create_owner, delete_document, get_document, list_documents, list_owners,
    resolve_kind, update_document,
};
pub use request_response::{
    CreateDocumentRequest, CreateOwnerRequest, DocumentResponse, ListDocumentsResponse,
    ListOwnersResponse, OwnerResponse, UpdateDocumentRequest,
};
