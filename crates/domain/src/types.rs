// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The business document types that receive a sequential human-readable ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Customer order (`C-YYYY-MM-NNNN`).
    Commande,
    /// Invoice (`F-YYYY-MM-NNNN`).
    Facture,
    /// Outgoing delivery note (`L-YYYY-MM-NNNN`).
    Livraison,
    /// Incoming delivery note (`L.EYYYY-MM-NNNN`).
    LivraisonEntree,
    /// Production plan (`PLAN-YYYY-MM-NNNN`).
    Planning,
}

/// How a document kind spells the leading part of its IDs.
///
/// The separator between the type code and the year is data, not code:
/// incoming delivery notes were historically issued without one and the
/// format must keep matching those already-issued IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindFormat {
    /// Fixed type code (e.g. `C`, `L.E`, `PLAN`).
    pub type_code: &'static str,
    /// Text between the type code and the four-digit year.
    pub code_separator: &'static str,
}

impl DocumentKind {
    /// Every kind, in route/display order.
    pub const ALL: [Self; 5] = [
        Self::Commande,
        Self::Facture,
        Self::Livraison,
        Self::LivraisonEntree,
        Self::Planning,
    ];

    /// Returns the ID format for this kind.
    #[must_use]
    pub const fn format(&self) -> KindFormat {
        match self {
            Self::Commande => KindFormat {
                type_code: "C",
                code_separator: "-",
            },
            Self::Facture => KindFormat {
                type_code: "F",
                code_separator: "-",
            },
            Self::Livraison => KindFormat {
                type_code: "L",
                code_separator: "-",
            },
            Self::LivraisonEntree => KindFormat {
                type_code: "L.E",
                code_separator: "",
            },
            Self::Planning => KindFormat {
                type_code: "PLAN",
                code_separator: "-",
            },
        }
    }

    /// Stable storage name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Commande => "commande",
            Self::Facture => "facture",
            Self::Livraison => "livraison",
            Self::LivraisonEntree => "livraison_entree",
            Self::Planning => "planning",
        }
    }

    /// URL path segment used by the HTTP routes.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Commande => "commandes",
            Self::Facture => "factures",
            Self::Livraison => "livraisons",
            Self::LivraisonEntree => "livraisons-entree",
            Self::Planning => "plannings",
        }
    }

    /// Resolves a URL path segment to a kind.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownDocumentKind` if the slug is not recognized.
    pub fn from_slug(slug: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == slug)
            .ok_or_else(|| DomainError::UnknownDocumentKind(slug.to_string()))
    }
}

impl FromStr for DocumentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownDocumentKind(s.to_string()))
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-readable primary key of a business document.
///
/// Assigned once by the allocator at creation time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wraps an already-issued ID, e.g. one read back from storage.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The party a document belongs to.
///
/// Identity is delegated to an external provider; `external_id` is the
/// subject that provider hands us, `owner_id` the internal row key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Internal numeric identifier assigned by the database.
    pub owner_id: i64,
    /// Identifier issued by the identity provider.
    pub external_id: String,
    /// Display name.
    pub name: String,
}

/// A persisted business document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: DocumentId,
    pub kind: DocumentKind,
    pub owner_id: i64,
    /// The owner's external identifier.
    pub owner: String,
    pub display_name: String,
    /// Business date printed on the document. Never used for numbering.
    pub document_date: Option<time::Date>,
    pub notes: Option<String>,
    /// Creation timestamp as stored by the database.
    pub created_at: String,
}
