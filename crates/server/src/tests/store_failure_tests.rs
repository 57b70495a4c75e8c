// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::{Connection, SqliteConnection, connection::SimpleConnection};

use super::*;

/// Builds a router over a shared-cache database with `OWNER` registered,
/// plus a second raw connection to the same database.
async fn app_with_side_connection(name: &str) -> (Router, SqliteConnection) {
    let url = format!(
        "file:atelier_server_{name}_{}?mode=memory&cache=shared",
        std::process::id()
    );
    let persistence = Persistence::new_with_sqlite_url(&url).expect("Failed to open database");
    let side = SqliteConnection::establish(&url).expect("Failed to open side connection");

    let app = build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        service: Arc::new(DocumentService::default()),
        clock: may_clock(),
    });
    let (status, _) = send(
        app.clone(),
        "POST",
        "/owners",
        Some(json!({ "external_id": OWNER, "name": "Atelier Nord" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::CREATED);

    (app, side)
}

#[tokio::test]
async fn test_exhausted_allocation_retries_return_500() {
    let (app, mut side) = app_with_side_connection("steal").await;

    // Another writer grabs whatever ID is being inserted, every time.
    side.batch_execute(
        "CREATE TRIGGER steal_document_id BEFORE INSERT ON documents
         BEGIN
             INSERT INTO documents (document_id, kind, owner_id, display_name, created_at)
             VALUES (NEW.document_id, NEW.kind, NEW.owner_id, 'Other writer', NEW.created_at);
         END;",
    )
    .unwrap();

    let (status, body) = send(
        app.clone(),
        "POST",
        "/commandes",
        Some(document_body("Robe de mariée")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("C-2024-05-"), "{details}");
    assert!(details.contains("5 attempts"), "{details}");

    // Each failed insert rolled back the stolen row with it.
    let (status, listing) = send(app, "GET", "/commandes", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(listing["documents"], json!([]));
}

#[tokio::test]
async fn test_store_failure_returns_500() {
    let (app, mut side) = app_with_side_connection("broken").await;
    create(&app, "commandes", "Avant la panne").await;

    side.batch_execute("DROP TABLE retired_document_ids;").unwrap();

    let (status, body) = send(
        app,
        "POST",
        "/commandes",
        Some(document_body("Après la panne")),
    )
    .await;

    assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    let details = body["details"].as_str().unwrap();
    assert!(details.starts_with("Store unavailable"), "{details}");
}
