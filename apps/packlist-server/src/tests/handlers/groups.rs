use crate::tests::common::*;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_group_under_trip() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Camping").await;

    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/groups"),
            ALICE,
            json!({ "name": "Tent A" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["tripId"], trip_id);
    assert_eq!(resp.body["name"], "Tent A");
    assert!(resp.body["createdAt"].is_string());

    let detail = app.get(&format!("/api/trips/{trip_id}"), ALICE).await;
    assert_eq!(detail.body["groups"][0]["name"], "Tent A");
    assert_eq!(detail.body["groups"][0]["members"], json!([]));
}

#[tokio::test]
async fn create_group_requires_name() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Camping").await;

    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/groups"),
            ALICE,
            json!({ "name": "  " }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "name");
}

#[tokio::test]
async fn create_group_for_missing_trip() {
    let app = create_test_app().await;
    let resp = app
        .post("/api/trips/77/groups", ALICE, json!({ "name": "Orphans" }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.message(), "Referenced trip 77 not found");
}

#[tokio::test]
async fn delete_group_removes_members_and_items() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Camping").await;
    let keep = app.create_group(trip_id, "Keep").await;
    let gone = app.create_group(trip_id, "Gone").await;
    app.create_member(gone, "Robin").await;
    app.create_item(trip_id, json!({ "name": "Stove", "groupId": gone }))
        .await;
    app.create_item(trip_id, json!({ "name": "Lantern", "groupId": keep }))
        .await;

    let resp = app.delete(&format!("/api/groups/{gone}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let detail = app.get(&format!("/api/trips/{trip_id}"), ALICE).await;
    let groups = detail.body["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["id"], keep);
    let items = detail.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Lantern");
}

#[tokio::test]
async fn delete_missing_group_is_no_content() {
    let app = create_test_app().await;
    let resp = app.delete("/api/groups/5", ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}
