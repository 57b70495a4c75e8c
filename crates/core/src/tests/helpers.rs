// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{BTreeMap, BTreeSet};

use atelier_domain::{Document, DocumentId, DocumentPrefix, Owner};
use chrono::{DateTime, TimeZone, Utc};

use crate::{CreateDocument, DocumentStore, ManualClock, NewDocument, StoreError};

/// A `DocumentStore` backed by maps, with knobs for failure injection.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub owners: Vec<Owner>,
    pub documents: BTreeMap<String, Document>,
    pub retired: BTreeSet<String>,
    /// Number of upcoming inserts that find their ID already taken by a
    /// competing writer.
    pub competitor_wins: u32,
    /// Fail every insert with `Unavailable`.
    pub inserts_unavailable: bool,
    pub insert_calls: u32,
    pub list_calls: u32,
}

impl InMemoryStore {
    pub fn with_owner(external_id: &str) -> Self {
        Self {
            owners: vec![Owner {
                owner_id: 1,
                external_id: external_id.to_string(),
                name: String::from("Atelier Nord"),
            }],
            ..Self::default()
        }
    }

    pub fn delete(&mut self, id: &str) {
        if self.documents.remove(id).is_some() {
            self.retired.insert(id.to_string());
        }
    }

    fn to_document(document: &NewDocument, owner: &str) -> Document {
        Document {
            id: document.id.clone(),
            kind: document.kind,
            owner_id: document.owner_id,
            owner: owner.to_string(),
            display_name: document.display_name.clone(),
            document_date: document.document_date,
            notes: document.notes.clone(),
            created_at: String::from("2024-05-15 10:00:00"),
        }
    }
}

impl DocumentStore for InMemoryStore {
    fn find_owner(&mut self, owner_ref: &str) -> Result<Option<Owner>, StoreError> {
        Ok(self
            .owners
            .iter()
            .find(|owner| owner.external_id == owner_ref)
            .cloned())
    }

    fn list_document_ids(&mut self, prefix: &DocumentPrefix) -> Result<Vec<String>, StoreError> {
        self.list_calls += 1;
        Ok(self
            .documents
            .keys()
            .chain(self.retired.iter())
            .filter(|id| id.starts_with(prefix.as_str()))
            .cloned()
            .collect())
    }

    fn insert_document(&mut self, document: &NewDocument) -> Result<Document, StoreError> {
        self.insert_calls += 1;
        if self.inserts_unavailable {
            return Err(StoreError::Unavailable(String::from("disk on fire")));
        }
        if self.competitor_wins > 0 {
            self.competitor_wins -= 1;
            let competitor: Document = Self::to_document(document, "competitor");
            self.documents
                .insert(document.id.as_str().to_string(), competitor);
        }
        let key: &str = document.id.as_str();
        if self.documents.contains_key(key) || self.retired.contains(key) {
            return Err(StoreError::Conflict(key.to_string()));
        }
        let owner: String = self
            .owners
            .iter()
            .find(|owner| owner.owner_id == document.owner_id)
            .map(|owner| owner.external_id.clone())
            .unwrap_or_default();
        let stored: Document = Self::to_document(document, &owner);
        self.documents.insert(key.to_string(), stored.clone());
        Ok(stored)
    }
}

pub fn may_15_2024() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 15, 10, 0, 0).unwrap()
}

pub fn may_clock() -> ManualClock {
    ManualClock::new(may_15_2024())
}

pub fn create_request(owner: &str, display_name: &str) -> CreateDocument {
    CreateDocument {
        owner: owner.to_string(),
        display_name: display_name.to_string(),
        document_date: None,
        notes: None,
    }
}

pub fn ids(documents: &[Document]) -> Vec<&str> {
    documents.iter().map(|d| d.id.as_str()).collect()
}

pub fn id(value: &str) -> DocumentId {
    DocumentId::new(value.to_string())
}
