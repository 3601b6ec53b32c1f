use crate::tests::common::*;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn create_trip_returns_stored_row() {
    let app = create_test_app().await;

    let resp = app
        .post(
            "/api/trips",
            ALICE,
            json!({
                "name": "Tokyo 2025",
                "description": "Spring break",
                "startDate": "2025-04-01",
                "endDate": "2025-04-10T18:00:00Z"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert!(resp.body["id"].is_i64());
    assert_eq!(resp.body["name"], "Tokyo 2025");
    assert_eq!(resp.body["description"], "Spring break");
    assert_eq!(resp.body["organizerId"], ALICE);
    assert_eq!(resp.body["startDate"], "2025-04-01T00:00:00Z");
    assert_eq!(resp.body["endDate"], "2025-04-10T18:00:00Z");
    assert!(resp.body["createdAt"].is_string());
}

#[tokio::test]
async fn organizer_is_always_the_caller() {
    let app = create_test_app().await;

    let resp = app
        .post(
            "/api/trips",
            ALICE,
            json!({ "name": "Road trip", "organizerId": BOB }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["organizerId"], ALICE);

    let bobs = app.get("/api/trips", BOB).await;
    assert_eq!(bobs.body, json!([]));
}

#[tokio::test]
async fn create_trip_validation() {
    let app = create_test_app().await;

    let resp = app.post("/api/trips", ALICE, json!({})).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "name is required");
    assert_eq!(resp.body["field"], "name");

    let resp = app
        .post(
            "/api/trips",
            ALICE,
            json!({ "name": "Trip", "startDate": "next tuesday" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.message().contains("invalid date"));

    // Empty and null dates mean no date
    let resp = app
        .post(
            "/api/trips",
            ALICE,
            json!({ "name": "Trip", "startDate": "", "endDate": null }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert!(resp.body["startDate"].is_null());
    assert!(resp.body["endDate"].is_null());
}

#[tokio::test]
async fn list_trips_is_scoped_to_caller() {
    let app = create_test_app().await;
    app.create_trip(ALICE, "Alps").await;
    app.create_trip(ALICE, "Coast").await;
    app.create_trip(BOB, "Desert").await;

    let resp = app.get("/api/trips", ALICE).await;
    assert_eq!(resp.status, StatusCode::OK);
    let mut names: Vec<_> = resp
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Alps", "Coast"]);
}

#[tokio::test]
async fn new_trip_has_no_groups_or_items() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Empty").await;

    let resp = app.get(&format!("/api/trips/{trip_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["id"], trip_id);
    assert_eq!(resp.body["name"], "Empty");
    assert_eq!(resp.body["groups"], json!([]));
    assert_eq!(resp.body["items"], json!([]));
}

#[tokio::test]
async fn get_missing_trip_is_not_found() {
    let app = create_test_app().await;
    let resp = app.get("/api/trips/999", ALICE).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({ "message": "Trip not found" }));
}

#[tokio::test]
async fn any_caller_can_read_a_trip_by_id() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Shared").await;

    let resp = app.get(&format!("/api/trips/{trip_id}"), BOB).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["organizerId"], ALICE);
}

#[tokio::test]
async fn tokyo_scenario() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Tokyo 2025").await;
    let smiths = app.create_group(trip_id, "Smiths").await;
    let dad = app.create_member(smiths, "Dad").await;
    let passport = app
        .create_item(
            trip_id,
            json!({ "name": "Passport", "groupId": smiths, "assignedToMemberId": dad }),
        )
        .await;

    let resp = app.get(&format!("/api/trips/{trip_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::OK);
    let detail: packlist_api::dto::TripDetail = serde_json::from_value(resp.body).unwrap();

    assert_eq!(detail.trip.name, "Tokyo 2025");
    assert_eq!(detail.groups.len(), 1);
    assert_eq!(detail.groups[0].group.name, "Smiths");
    assert_eq!(detail.groups[0].members.len(), 1);
    assert_eq!(detail.groups[0].members[0].name, "Dad");

    let dads: Vec<_> = detail.member_items(dad).collect();
    assert_eq!(dads.len(), 1);
    assert_eq!(dads[0].id, passport);
    assert_eq!(dads[0].name, "Passport");
    assert!(!dads[0].is_packed);

    // The assignee is embedded alongside the item
    assert_eq!(
        detail.items[0].assigned_to.as_ref().map(|m| m.name.as_str()),
        Some("Dad")
    );
}

#[tokio::test]
async fn delete_trip_cascades() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Doomed").await;
    let group = app.create_group(trip_id, "Crew").await;
    app.create_member(group, "Pat").await;
    let item = app
        .create_item(trip_id, json!({ "name": "Map", "groupId": group }))
        .await;

    let resp = app.delete(&format!("/api/trips/{trip_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(resp.body.is_null());

    let resp = app.get(&format!("/api/trips/{trip_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    // Children went with the trip
    let resp = app
        .patch(&format!("/api/items/{item}"), ALICE, json!({ "isPacked": true }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    let resp = app
        .post(
            &format!("/api/groups/{group}/members"),
            ALICE,
            json!({ "name": "Late" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_trip_is_no_content() {
    let app = create_test_app().await;
    let resp = app.delete("/api/trips/424242", ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}
