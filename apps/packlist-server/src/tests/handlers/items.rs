use crate::tests::common::*;
use axum::http::StatusCode;
use packlist_api::dto::TripDetail;
use serde_json::json;

async fn trip_detail(app: &TestApp, trip_id: i64) -> TripDetail {
    let resp = app.get(&format!("/api/trips/{trip_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::OK);
    serde_json::from_value(resp.body).unwrap()
}

#[tokio::test]
async fn create_item_defaults() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Beach").await;

    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/items"),
            ALICE,
            json!({ "name": "Sunscreen" }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["tripId"], trip_id);
    assert_eq!(resp.body["quantity"], 1);
    assert_eq!(resp.body["isPacked"], false);
    assert!(resp.body["groupId"].is_null());
    assert!(resp.body["assignedToMemberId"].is_null());
}

#[tokio::test]
async fn create_item_validation() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Beach").await;
    let uri = format!("/api/trips/{trip_id}/items");

    let resp = app.post(&uri, ALICE, json!({ "quantity": 2 })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "name");

    let resp = app.post(&uri, ALICE, json!({ "name": "   " })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.message(), "name is required");

    // Quantities are stored as given
    let resp = app
        .post(&uri, ALICE, json!({ "name": "Towel", "quantity": 0 }))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["quantity"], 0);
}

#[tokio::test]
async fn create_item_with_missing_references() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Beach").await;

    let resp = app
        .post("/api/trips/404/items", ALICE, json!({ "name": "Hat" }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.message().starts_with("Referenced"));

    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/items"),
            ALICE,
            json!({ "name": "Hat", "groupId": 999 }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shared_and_member_partitions() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Lake").await;
    let group = app.create_group(trip_id, "Family").await;
    let mum = app.create_member(group, "Mum").await;
    let kid = app.create_member(group, "Kid").await;

    let cooler = app
        .create_item(trip_id, json!({ "name": "Cooler", "groupId": group }))
        .await;
    let book = app
        .create_item(
            trip_id,
            json!({ "name": "Book", "groupId": group, "assignedToMemberId": mum }),
        )
        .await;

    let detail = trip_detail(&app, trip_id).await;

    let shared: Vec<_> = detail.shared_items(group).map(|i| i.id).collect();
    assert_eq!(shared, vec![cooler]);
    let mums: Vec<_> = detail.member_items(mum).map(|i| i.id).collect();
    assert_eq!(mums, vec![book]);
    assert_eq!(detail.member_items(kid).count(), 0);
}

#[tokio::test]
async fn mismatched_assignment_is_stored_as_given() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Lake").await;
    let group_a = app.create_group(trip_id, "A").await;
    let group_b = app.create_group(trip_id, "B").await;
    let member_b = app.create_member(group_b, "Bea").await;

    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/items"),
            ALICE,
            json!({ "name": "Rope", "groupId": group_a, "assignedToMemberId": member_b }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["groupId"], group_a);
    assert_eq!(resp.body["assignedToMemberId"], member_b);
}

#[tokio::test]
async fn patch_is_packed_touches_only_that_field() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Lake").await;
    let group = app.create_group(trip_id, "Family").await;
    let item_id = app
        .create_item(
            trip_id,
            json!({ "name": "Paddles", "quantity": 2, "groupId": group }),
        )
        .await;

    let before = trip_detail(&app, trip_id).await.items[0].item.clone();

    let resp = app
        .patch(
            &format!("/api/items/{item_id}"),
            ALICE,
            json!({ "isPacked": true }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["isPacked"], true);

    let after = trip_detail(&app, trip_id).await.items[0].item.clone();
    assert!(after.is_packed);
    assert_eq!(
        packlist_api::dto::Item {
            is_packed: false,
            ..after
        },
        before
    );
}

#[tokio::test]
async fn patch_can_clear_and_move_assignment() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Lake").await;
    let group = app.create_group(trip_id, "Family").await;
    let member = app.create_member(group, "Mum").await;
    let item_id = app
        .create_item(
            trip_id,
            json!({ "name": "Kayak", "groupId": group, "assignedToMemberId": member }),
        )
        .await;
    let uri = format!("/api/items/{item_id}");

    let resp = app
        .patch(&uri, ALICE, json!({ "assignedToMemberId": null }))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body["assignedToMemberId"].is_null());
    assert_eq!(resp.body["groupId"], group);

    let resp = app
        .patch(&uri, ALICE, json!({ "name": "Canoe", "quantity": 3, "groupId": null }))
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "Canoe");
    assert_eq!(resp.body["quantity"], 3);
    assert!(resp.body["groupId"].is_null());
}

#[tokio::test]
async fn patch_edge_cases() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Lake").await;
    let item_id = app.create_item(trip_id, json!({ "name": "Hat" })).await;
    let uri = format!("/api/items/{item_id}");

    // Empty patch returns the item unchanged
    let resp = app.patch(&uri, ALICE, json!({})).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "Hat");

    let resp = app.patch(&uri, ALICE, json!({ "name": "" })).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "name");

    let resp = app.patch(&uri, ALICE, json!({ "quantity": 0 })).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["quantity"], 0);

    let resp = app
        .patch("/api/items/9999", ALICE, json!({ "isPacked": true }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.message(), "Item not found");

    let resp = app.patch("/api/items/9999", ALICE, json!({})).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = app
        .patch(&uri, ALICE, json!({ "assignedToMemberId": 4242 }))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.message().starts_with("Referenced"));
}

#[tokio::test]
async fn delete_item() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Lake").await;
    let item_id = app.create_item(trip_id, json!({ "name": "Hat" })).await;

    let resp = app.delete(&format!("/api/items/{item_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(trip_detail(&app, trip_id).await.items.is_empty());

    let resp = app.delete(&format!("/api/items/{item_id}"), ALICE).await;
    assert_eq!(resp.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn bulk_create_imports_into_group() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Festival").await;
    let group = app.create_group(trip_id, "Friends").await;

    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/items/bulk"),
            ALICE,
            json!({ "items": [
                { "name": "Tent", "groupId": group },
                { "name": "Earplugs", "quantity": 6, "groupId": group },
                { "name": "Wellies", "quantity": 2, "groupId": group }
            ]}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let created = resp.body.as_array().unwrap();
    assert_eq!(created.len(), 3);
    for item in created {
        assert_eq!(item["tripId"], trip_id);
        assert_eq!(item["groupId"], group);
        assert!(item["assignedToMemberId"].is_null());
    }
    let names: Vec<_> = created.iter().map(|i| i["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Tent", "Earplugs", "Wellies"]);

    let detail = trip_detail(&app, trip_id).await;
    assert_eq!(detail.shared_items(group).count(), 3);
}

#[tokio::test]
async fn bulk_create_edge_cases() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Festival").await;
    let uri = format!("/api/trips/{trip_id}/items/bulk");

    let resp = app.post(&uri, ALICE, json!({ "items": [] })).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body, json!([]));

    let resp = app
        .post(
            &uri,
            ALICE,
            json!({ "items": [{ "name": "Tent" }, { "name": "" }] }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["field"], "items[1].name");

    // One bad reference rejects the whole batch
    let resp = app
        .post(
            &uri,
            ALICE,
            json!({ "items": [{ "name": "Tent" }, { "name": "Chair", "groupId": 31337 }] }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(trip_detail(&app, trip_id).await.items.is_empty());
}

#[tokio::test]
async fn bulk_create_large_batch() {
    let app = create_test_app().await;
    let trip_id = app.create_trip(ALICE, "Expedition").await;

    let items: Vec<_> = (0..6000)
        .map(|i| json!({ "name": format!("Item {i}") }))
        .collect();
    let resp = app
        .post(
            &format!("/api/trips/{trip_id}/items/bulk"),
            ALICE,
            json!({ "items": items }),
        )
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let created = resp.body.as_array().unwrap();
    assert_eq!(created.len(), 6000);
    assert_eq!(created[5999]["name"], "Item 5999");

    assert_eq!(trip_detail(&app, trip_id).await.items.len(), 6000);
}
