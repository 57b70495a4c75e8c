// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::*;

#[tokio::test]
async fn test_health() {
    let app = build_router(create_test_app_state(may_clock()));

    let (status, body) = send(app, "GET", "/health", None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_duplicate_owner_is_409() {
    let app = app_with_owner(may_clock()).await;

    let (status, body) = send(
        app.clone(),
        "POST",
        "/owners",
        Some(json!({ "external_id": OWNER, "name": "Autre" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::CONFLICT);
    assert_eq!(body["error"], "Owner already exists");

    let (_, owners) = send(app, "GET", "/owners", None).await;
    assert_eq!(owners["owners"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_overlong_owner_fields_are_400() {
    let app = build_router(create_test_app_state(may_clock()));

    let (status, body) = send(
        app.clone(),
        "POST",
        "/owners",
        Some(json!({ "external_id": "x".repeat(256), "name": "Atelier Sud" })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input");
    assert!(body["details"].as_str().unwrap().starts_with("owner:"), "{body}");

    let (status, body) = send(
        app.clone(),
        "POST",
        "/owners",
        Some(json!({ "external_id": "auth0|sud", "name": "n".repeat(256) })),
    )
    .await;
    assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().starts_with("name:"), "{body}");

    let (_, owners) = send(app, "GET", "/owners", None).await;
    assert_eq!(owners["owners"], json!([]));
}

#[tokio::test]
async fn test_get_document_by_kind_and_id() {
    let app = app_with_owner(may_clock()).await;
    create(&app, "factures", "Facture mai").await;

    let (status, body) = send(app.clone(), "GET", "/factures/F-2024-05-0001", None).await;
    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["display_name"], "Facture mai");

    // Right ID, wrong kind.
    let (status, body) = send(app, "GET", "/commandes/F-2024-05-0001", None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Document not found");
}

#[tokio::test]
async fn test_list_documents_is_ordered_by_id() {
    let app = app_with_owner(may_clock()).await;
    for name in ["A", "B", "C"] {
        create(&app, "livraisons-entree", name).await;
    }
    create(&app, "livraisons", "Autre type").await;

    let (status, body) = send(app, "GET", "/livraisons-entree", None).await;

    assert_eq!(status, HttpStatusCode::OK);
    assert_eq!(body["kind"], "livraison_entree");
    let ids: Vec<&str> = body["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec!["L.E2024-05-0001", "L.E2024-05-0002", "L.E2024-05-0003"]
    );
}

#[tokio::test]
async fn test_patch_updates_fields_but_not_id() {
    let app = app_with_owner(may_clock()).await;
    send(
        app.clone(),
        "POST",
        "/commandes",
        Some(json!({
            "owner": OWNER,
            "display_name": "Manteau",
            "notes": "doublure"
        })),
    )
    .await;

    let (status, body) = send(
        app.clone(),
        "PATCH",
        "/commandes/C-2024-05-0001",
        Some(json!({
            "display_name": "Manteau long",
            "document_date": "2024-05-02",
            "notes": null,
            "id": "C-2024-05-9999"
        })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::OK, "{body}");
    assert_eq!(body["id"], "C-2024-05-0001");
    assert_eq!(body["display_name"], "Manteau long");
    assert_eq!(body["document_date"], "2024-05-02");
    assert_eq!(body["notes"], Value::Null);

    let (status, _) = send(app, "GET", "/commandes/C-2024-05-9999", None).await;
    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_missing_document_is_404() {
    let app = app_with_owner(may_clock()).await;

    let (status, _) = send(
        app,
        "PATCH",
        "/plannings/PLAN-2024-05-0001",
        Some(json!({ "display_name": "Rien" })),
    )
    .await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_document_is_404() {
    let app = app_with_owner(may_clock()).await;

    let (status, body) = send(app, "DELETE", "/factures/F-2024-05-0042", None).await;

    assert_eq!(status, HttpStatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Document not found");
}
