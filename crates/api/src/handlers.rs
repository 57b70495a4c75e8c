// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers take the persistence adapter by `&mut` and return API DTOs.
//! They never hold state across calls.

use atelier::{Clock, CreateDocument, DocumentService};
use atelier_domain::{
    Document, DocumentKind, Owner, parse_document_date, validate_display_name, validate_notes,
    validate_owner_name, validate_owner_reference,
};
use atelier_persistence::{DocumentChanges, Persistence};
use time::Date;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    CreateDocumentRequest, CreateOwnerRequest, DocumentResponse, ListDocumentsResponse,
    ListOwnersResponse, OwnerResponse, UpdateDocumentRequest,
};

/// Resolves a route segment such as `commandes` to its document kind.
///
/// # Errors
///
/// Returns `ApiError::UnknownDocumentType` if the segment names no kind.
pub fn resolve_kind(slug: &str) -> Result<DocumentKind, ApiError> {
    DocumentKind::from_slug(slug).map_err(translate_domain_error)
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_document_date)
        .transpose()
        .map_err(translate_domain_error)
}

fn document_not_found(kind: DocumentKind, document_id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Document"),
        message: format!("No {kind} document with id '{document_id}'"),
    }
}

/// Registers an owner.
///
/// # Errors
///
/// - `ApiError::InvalidInput` if the external ID or name is invalid
/// - `ApiError::Conflict` if the external ID is already registered
/// - `ApiError::Internal` if persistence fails
pub fn create_owner(
    persistence: &mut Persistence,
    request: CreateOwnerRequest,
) -> Result<OwnerResponse, ApiError> {
    validate_owner_reference(&request.external_id).map_err(translate_domain_error)?;
    let name: String = validate_owner_name(&request.name).map_err(translate_domain_error)?;

    let owner: Owner = persistence
        .create_owner(&request.external_id, &name)
        .map_err(translate_persistence_error)?;

    Ok(OwnerResponse::from(owner))
}

/// Lists registered owners.
///
/// # Errors
///
/// Returns `ApiError::Internal` if persistence fails.
pub fn list_owners(persistence: &mut Persistence) -> Result<ListOwnersResponse, ApiError> {
    let owners: Vec<Owner> = persistence
        .list_owners()
        .map_err(translate_persistence_error)?;

    Ok(ListOwnersResponse {
        owners: owners.into_iter().map(OwnerResponse::from).collect(),
    })
}

/// Creates a document of `kind` with a freshly allocated ID.
///
/// # Errors
///
/// - `ApiError::InvalidInput` if the request fails validation
/// - `ApiError::ResourceNotFound` if the owner does not exist
/// - `ApiError::Internal` if allocation keeps colliding or the store fails
pub fn create_document<C: Clock + ?Sized>(
    persistence: &mut Persistence,
    service: &DocumentService,
    clock: &C,
    kind: DocumentKind,
    request: CreateDocumentRequest,
) -> Result<DocumentResponse, ApiError> {
    let document_date: Option<Date> = parse_optional_date(request.document_date.as_deref())?;

    let document: Document = service
        .create(
            persistence,
            clock,
            kind,
            CreateDocument {
                owner: request.owner,
                display_name: request.display_name,
                document_date,
                notes: request.notes,
            },
        )
        .map_err(translate_core_error)?;

    Ok(DocumentResponse::from(document))
}

/// Fetches one document of `kind`.
///
/// # Errors
///
/// - `ApiError::ResourceNotFound` if no live document of that kind has the ID
/// - `ApiError::Internal` if persistence fails
pub fn get_document(
    persistence: &mut Persistence,
    kind: DocumentKind,
    document_id: &str,
) -> Result<DocumentResponse, ApiError> {
    persistence
        .get_document(kind, document_id)
        .map_err(translate_persistence_error)?
        .map(DocumentResponse::from)
        .ok_or_else(|| document_not_found(kind, document_id))
}

/// Lists the documents of `kind`, ordered by ID.
///
/// # Errors
///
/// Returns `ApiError::Internal` if persistence fails.
pub fn list_documents(
    persistence: &mut Persistence,
    kind: DocumentKind,
) -> Result<ListDocumentsResponse, ApiError> {
    let documents: Vec<Document> = persistence
        .list_documents(kind)
        .map_err(translate_persistence_error)?;

    debug!(%kind, count = documents.len(), "Listed documents");

    Ok(ListDocumentsResponse {
        kind,
        documents: documents.into_iter().map(DocumentResponse::from).collect(),
    })
}

/// Updates the mutable fields of a document. The ID never changes.
///
/// # Errors
///
/// - `ApiError::InvalidInput` if a supplied field is invalid
/// - `ApiError::ResourceNotFound` if no live document of that kind has the ID
/// - `ApiError::Internal` if persistence fails
pub fn update_document(
    persistence: &mut Persistence,
    kind: DocumentKind,
    document_id: &str,
    request: UpdateDocumentRequest,
) -> Result<DocumentResponse, ApiError> {
    let display_name: Option<String> = request
        .display_name
        .as_deref()
        .map(validate_display_name)
        .transpose()
        .map_err(translate_domain_error)?;
    let document_date: Option<Option<Date>> = request
        .document_date
        .map(|date| parse_optional_date(date.as_deref()))
        .transpose()?;
    let notes: Option<Option<String>> = request
        .notes
        .map(|notes| validate_notes(notes.as_deref()))
        .transpose()
        .map_err(translate_domain_error)?;

    let changes = DocumentChanges {
        display_name,
        document_date,
        notes,
    };

    persistence
        .update_document(kind, document_id, &changes)
        .map_err(translate_persistence_error)?
        .map(DocumentResponse::from)
        .ok_or_else(|| document_not_found(kind, document_id))
}

/// Deletes a document. Its ID is retired and never issued again.
///
/// # Errors
///
/// - `ApiError::ResourceNotFound` if no live document of that kind has the ID
/// - `ApiError::Internal` if persistence fails
pub fn delete_document(
    persistence: &mut Persistence,
    kind: DocumentKind,
    document_id: &str,
) -> Result<(), ApiError> {
    let deleted: bool = persistence
        .delete_document(kind, document_id)
        .map_err(translate_persistence_error)?;

    if !deleted {
        return Err(document_not_found(kind, document_id));
    }

    info!(%kind, document_id, "Document deleted");
    Ok(())
}
