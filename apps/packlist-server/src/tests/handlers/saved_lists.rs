use crate::tests::common::*;
use axum::http::StatusCode;
use packlist_api::dto::SavedListWithItems;
use serde_json::json;

#[tokio::test]
async fn saved_list_round_trip() {
    let app = create_test_app().await;

    let resp = app
        .post(
            "/api/saved-lists",
            ALICE,
            json!({
                "name": "Weekend away",
                "items": [
                    { "name": "Socks", "quantity": 1 },
                    { "name": "Passport", "quantity": 1 }
                ]
            }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let list_id = resp.id();
    assert_eq!(resp.body["userId"], ALICE);
    assert_eq!(resp.body["name"], "Weekend away");

    let resp = app.get("/api/saved-lists", ALICE).await;
    assert_eq!(resp.status, StatusCode::OK);
    let lists: Vec<SavedListWithItems> = serde_json::from_value(resp.body).unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].list.id, list_id);
    let items: Vec<_> = lists[0]
        .items
        .iter()
        .map(|i| (i.name.as_str(), i.quantity, i.saved_list_id))
        .collect();
    assert_eq!(
        items,
        vec![("Socks", 1, list_id), ("Passport", 1, list_id)]
    );
}

#[tokio::test]
async fn saved_lists_are_scoped_to_caller() {
    let app = create_test_app().await;
    app.post(
        "/api/saved-lists",
        ALICE,
        json!({ "name": "Mine", "items": [{ "name": "Hat" }] }),
    )
    .await;

    let resp = app.get("/api/saved-lists", BOB).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([]));
}

#[tokio::test]
async fn create_saved_list_validation() {
    let app = create_test_app().await;

    let resp = app
        .post("/api/saved-lists", ALICE, json!({ "name": "Empty", "items": [] }))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "items");

    let resp = app
        .post(
            "/api/saved-lists",
            ALICE,
            json!({ "name": "Bad", "items": [{ "name": "Hat" }, { "name": " " }] }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "items[1].name");

    // Nothing was written
    let resp = app.get("/api/saved-lists", ALICE).await;
    assert_eq!(resp.body, json!([]));
}

#[tokio::test]
async fn delete_saved_list() {
    let app = create_test_app().await;
    let resp = app
        .post(
            "/api/saved-lists",
            ALICE,
            json!({ "name": "Old", "items": [{ "name": "Map" }] }),
        )
        .await;
    let list_id = resp.id();

    let resp = app.delete(&format!("/api/saved-lists/{list_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    let resp = app.get("/api/saved-lists", ALICE).await;
    assert_eq!(resp.body, json!([]));

    let resp = app.delete(&format!("/api/saved-lists/{list_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn import_saved_list_into_trip_group() {
    let app = create_test_app().await;
    app.post(
        "/api/saved-lists",
        ALICE,
        json!({
            "name": "Beach kit",
            "items": [
                { "name": "Towel", "quantity": 2 },
                { "name": "Sunscreen" },
                { "name": "Goggles", "quantity": 3 }
            ]
        }),
    )
    .await;
    let trip_id = app.create_trip(ALICE, "Seaside").await;
    let group = app.create_group(trip_id, "Kids").await;

    let lists: Vec<SavedListWithItems> =
        serde_json::from_value(app.get("/api/saved-lists", ALICE).await.body).unwrap();
    let import = lists[0].import_into_group(group);

    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/items/bulk"),
            ALICE,
            serde_json::to_value(&import).unwrap(),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let created = resp.body.as_array().unwrap();
    assert_eq!(created.len(), 3);
    for item in created {
        assert_eq!(item["tripId"], trip_id);
        assert_eq!(item["groupId"], group);
        assert!(item["assignedToMemberId"].is_null());
        assert_eq!(item["isPacked"], false);
    }
    assert_eq!(created[0]["quantity"], 2);
}
