// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod allocation_tests;

use std::sync::atomic::Ordering;

use atelier::NewDocument;
use atelier_domain::{DocumentId, DocumentKind, Owner};

use crate::{DB_COUNTER, Persistence};

pub const OWNER_REF: &str = "auth0|atelier-nord";

/// Returns a fresh persistence instance with one registered owner.
pub fn persistence_with_owner() -> (Persistence, Owner) {
    let mut persistence = Persistence::new_in_memory().expect("in-memory database");
    let owner = persistence
        .create_owner(OWNER_REF, "Atelier Nord")
        .expect("owner created");
    (persistence, owner)
}

/// Returns a shared-cache URL for a database no other test uses.
pub fn unique_shared_url() -> String {
    let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("file:memdb_shared_{db_id}?mode=memory&cache=shared")
}

/// Returns an empty directory under the system temp dir for file databases.
pub fn unique_temp_dir(label: &str) -> std::path::PathBuf {
    let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "atelier_{label}_{}_{db_id}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn new_document(id: &str, kind: DocumentKind, owner: &Owner) -> NewDocument {
    NewDocument {
        id: DocumentId::new(id.to_string()),
        kind,
        owner_id: owner.owner_id,
        display_name: format!("Document {id}"),
        document_date: None,
        notes: None,
    }
}
