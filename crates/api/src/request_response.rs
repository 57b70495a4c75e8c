// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use atelier_domain::{Document, DocumentKind, Owner, format_document_date};
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// API request to register an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOwnerRequest {
    /// Subject issued by the identity provider.
    pub external_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerResponse {
    pub owner_id: i64,
    pub external_id: String,
    pub name: String,
}

impl From<Owner> for OwnerResponse {
    fn from(owner: Owner) -> Self {
        Self {
            owner_id: owner.owner_id,
            external_id: owner.external_id,
            name: owner.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOwnersResponse {
    pub owners: Vec<OwnerResponse>,
}

/// API request to create a document.
///
/// The ID is never part of the request; it is allocated on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDocumentRequest {
    /// External ID of the owning party.
    pub owner: String,
    pub display_name: String,
    /// Business date (`YYYY-MM-DD`). Does not affect numbering.
    #[serde(default)]
    pub document_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to change a document's mutable fields.
///
/// Absent fields are left alone; `null` clears `document_date` or `notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub document_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

/// A document as returned by every document endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: String,
    pub kind: DocumentKind,
    pub owner_id: i64,
    /// External ID of the owning party.
    pub owner: String,
    pub display_name: String,
    pub document_date: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id.into_inner(),
            kind: document.kind,
            owner_id: document.owner_id,
            owner: document.owner,
            display_name: document.display_name,
            document_date: document.document_date.map(format_document_date),
            notes: document.notes,
            created_at: document.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDocumentsResponse {
    pub kind: DocumentKind,
    pub documents: Vec<DocumentResponse>,
}
