// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allocation against a real database.
//!
//! The race tests open two connections on one shared database and let the
//! second one commit between the first one's ID scan and its insert.

use atelier::{CoreError, CreateDocument, DocumentService, DocumentStore, ManualClock, NewDocument, StoreError};
use atelier_domain::{Document, DocumentKind, DocumentPrefix, Owner};
use chrono::{TimeZone, Utc};

use super::{OWNER_REF, persistence_with_owner, unique_shared_url, unique_temp_dir};
use crate::Persistence;

fn may_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 15, 9, 30, 0).unwrap())
}

fn request(display_name: &str) -> CreateDocument {
    CreateDocument {
        owner: OWNER_REF.to_string(),
        display_name: display_name.to_string(),
        document_date: None,
        notes: None,
    }
}

/// A store whose ID scans let a competing connection write first.
struct InterleavedStore<'a> {
    store: &'a mut Persistence,
    competitor: &'a mut Persistence,
    /// Document IDs the competitor inserts, one per scan, in order.
    competitor_ids: Vec<String>,
    competitor_owner: Owner,
    inserts: u32,
}

impl DocumentStore for InterleavedStore<'_> {
    fn find_owner(&mut self, owner_ref: &str) -> Result<Option<Owner>, StoreError> {
        self.store.find_owner(owner_ref)
    }

    fn list_document_ids(&mut self, prefix: &DocumentPrefix) -> Result<Vec<String>, StoreError> {
        let ids = self.store.list_document_ids(prefix);
        if !self.competitor_ids.is_empty() {
            let id = self.competitor_ids.remove(0);
            self.competitor
                .insert_document(&NewDocument {
                    id: atelier_domain::DocumentId::new(id),
                    kind: DocumentKind::Commande,
                    owner_id: self.competitor_owner.owner_id,
                    display_name: String::from("Competitor"),
                    document_date: None,
                    notes: None,
                })
                .unwrap();
        }
        ids
    }

    fn insert_document(&mut self, document: &NewDocument) -> Result<Document, StoreError> {
        self.inserts += 1;
        DocumentStore::insert_document(self.store, document)
    }
}

#[test]
fn test_sequential_creations_against_sqlite() {
    let (mut persistence, _) = persistence_with_owner();
    let service = DocumentService::default();
    let clock = may_clock();

    let ids: Vec<String> = (0..3)
        .map(|n| {
            service
                .create(&mut persistence, &clock, DocumentKind::Facture, request(&format!("F{n}")))
                .unwrap()
                .id
                .into_inner()
        })
        .collect();

    assert_eq!(ids, vec!["F-2024-05-0001", "F-2024-05-0002", "F-2024-05-0003"]);
}

#[test]
fn test_deleting_the_highest_id_does_not_free_it() {
    let (mut persistence, _) = persistence_with_owner();
    let service = DocumentService::default();
    let clock = may_clock();

    let first = service
        .create(&mut persistence, &clock, DocumentKind::Livraison, request("A"))
        .unwrap();
    let second = service
        .create(&mut persistence, &clock, DocumentKind::Livraison, request("B"))
        .unwrap();
    assert!(
        persistence
            .delete_document(DocumentKind::Livraison, second.id.as_str())
            .unwrap()
    );

    let third = service
        .create(&mut persistence, &clock, DocumentKind::Livraison, request("C"))
        .unwrap();

    assert_eq!(first.id.as_str(), "L-2024-05-0001");
    assert_eq!(third.id.as_str(), "L-2024-05-0003");
}

#[test]
fn test_competing_connection_forces_a_retry() {
    let url = unique_shared_url();
    let mut ours = Persistence::new_with_sqlite_url(&url).unwrap();
    let mut theirs = Persistence::new_with_sqlite_url(&url).unwrap();
    let owner = ours.create_owner(OWNER_REF, "Atelier Nord").unwrap();

    let mut store = InterleavedStore {
        store: &mut ours,
        competitor: &mut theirs,
        competitor_ids: vec![String::from("C-2024-05-0001")],
        competitor_owner: owner,
        inserts: 0,
    };
    let document = DocumentService::default()
        .create(&mut store, &may_clock(), DocumentKind::Commande, request("Ours"))
        .unwrap();
    let inserts = store.inserts;

    assert_eq!(document.id.as_str(), "C-2024-05-0002");
    assert_eq!(inserts, 2);

    let ids: Vec<String> = ours
        .list_documents(DocumentKind::Commande)
        .unwrap()
        .into_iter()
        .map(|d| d.id.into_inner())
        .collect();
    assert_eq!(ids, vec!["C-2024-05-0001", "C-2024-05-0002"]);
}

#[test]
fn test_persistent_competition_exhausts_attempts() {
    let url = unique_shared_url();
    let mut ours = Persistence::new_with_sqlite_url(&url).unwrap();
    let mut theirs = Persistence::new_with_sqlite_url(&url).unwrap();
    let owner = ours.create_owner(OWNER_REF, "Atelier Nord").unwrap();

    let mut store = InterleavedStore {
        store: &mut ours,
        competitor: &mut theirs,
        competitor_ids: (1..=3).map(|n| format!("C-2024-05-{n:04}")).collect(),
        competitor_owner: owner,
        inserts: 0,
    };
    let result = DocumentService::new(chrono_tz::Tz::UTC, 3).create(
        &mut store,
        &may_clock(),
        DocumentKind::Commande,
        request("Ours"),
    );
    let inserts = store.inserts;

    assert_eq!(
        result,
        Err(CoreError::AllocationConflict {
            prefix: String::from("C-2024-05-"),
            attempts: 3,
        })
    );
    assert_eq!(inserts, 3);
    assert_eq!(ours.list_documents(DocumentKind::Commande).unwrap().len(), 3);
}

#[test]
fn test_unknown_owner_persists_nothing() {
    let (mut persistence, _) = persistence_with_owner();

    let result = DocumentService::default().create(
        &mut persistence,
        &may_clock(),
        DocumentKind::Commande,
        CreateDocument {
            owner: String::from("auth0|ghost"),
            ..request("Ghost")
        },
    );

    assert_eq!(result, Err(CoreError::OwnerNotFound(String::from("auth0|ghost"))));
    assert!(persistence.list_documents(DocumentKind::Commande).unwrap().is_empty());
}

#[test]
fn test_concurrent_writers_on_one_file_never_see_a_locked_database() {
    const WRITERS: usize = 4;
    const PER_WRITER: usize = 25;

    let dir = unique_temp_dir("file_race");
    let path = dir.join("race.db");
    Persistence::new_with_file(&path)
        .unwrap()
        .create_owner(OWNER_REF, "Atelier Nord")
        .unwrap();

    // A generous budget: this is about lock upgrades, not retry exhaustion.
    let service = DocumentService::new(chrono_tz::Tz::UTC, 50);
    let clock = may_clock();

    let results: Vec<Result<Document, CoreError>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..WRITERS)
            .map(|writer| {
                let path = &path;
                let service = &service;
                let clock = &clock;
                scope.spawn(move || {
                    let mut persistence = Persistence::new_with_file(path).unwrap();
                    (0..PER_WRITER)
                        .map(|n| {
                            service.create(
                                &mut persistence,
                                clock,
                                DocumentKind::Commande,
                                request(&format!("Writer {writer} #{n}")),
                            )
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect()
    });

    let errors: Vec<&CoreError> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert!(errors.is_empty(), "failed creations: {errors:?}");

    let mut ids: Vec<String> = results
        .into_iter()
        .map(|r| r.unwrap().id.into_inner())
        .collect();
    ids.sort();
    let expected: Vec<String> = (1..=WRITERS * PER_WRITER)
        .map(|n| format!("C-2024-05-{n:04}"))
        .collect();
    assert_eq!(ids, expected);

    let _ = std::fs::remove_dir_all(&dir);
}
