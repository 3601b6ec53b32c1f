use crate::tests::common::*;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_member_with_optional_fields() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Ski week").await;
    let group = app.create_group(trip_id, "Cabin").await;

    let resp = app
        .post(
            &format!("/api/groups/{group}/members"),
            ALICE,
            json!({ "name": "Mum", "userId": BOB, "email": "mum@example.com" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["groupId"], group);
    assert_eq!(resp.body["name"], "Mum");
    assert_eq!(resp.body["userId"], BOB);
    assert_eq!(resp.body["email"], "mum@example.com");

    let resp = app
        .post(
            &format!("/api/groups/{group}/members"),
            ALICE,
            json!({ "name": "Kid" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert!(resp.body["userId"].is_null());
    assert!(resp.body["email"].is_null());
}

#[tokio::test]
async fn create_member_for_missing_group() {
    let app = create_test_app().await;
    let resp = app
        .post("/api/groups/12/members", ALICE, json!({ "name": "Nobody" }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.message(), "Referenced group 12 not found");
}

#[tokio::test]
async fn deleting_member_moves_items_to_shared_list() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Ski week").await;
    let group = app.create_group(trip_id, "Cabin").await;
    let member = app.create_member(group, "Uncle").await;
    let item = app
        .create_item(
            trip_id,
            json!({ "name": "Skis", "groupId": group, "assignedToMemberId": member }),
        )
        .await;

    let resp = app.delete(&format!("/api/members/{member}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);

    let resp = app.get(&format!("/api/trips/{trip_id}"), ALICE).await;
    let detail: packlist_api::dto::TripDetail = serde_json::from_value(resp.body).unwrap();
    assert!(detail.groups[0].members.is_empty());
    let shared: Vec<_> = detail.shared_items(group).map(|i| i.id).collect();
    assert_eq!(shared, vec![item]);
    assert!(detail.items[0].assigned_to.is_none());
}
