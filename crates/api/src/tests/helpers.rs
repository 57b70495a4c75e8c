// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use atelier::ManualClock;
use atelier_persistence::Persistence;
use chrono::{TimeZone, Utc};

use crate::{CreateDocumentRequest, CreateOwnerRequest, create_owner};

pub const OWNER: &str = "auth0|atelier-nord";

pub fn create_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    create_owner(
        &mut persistence,
        CreateOwnerRequest {
            external_id: String::from(OWNER),
            name: String::from("Atelier Nord"),
        },
    )
    .unwrap();
    persistence
}

pub fn may_clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 20, 14, 0, 0).unwrap())
}

pub fn create_request(display_name: &str) -> CreateDocumentRequest {
    CreateDocumentRequest {
        owner: String::from(OWNER),
        display_name: String::from(display_name),
        document_date: None,
        notes: None,
    }
}
