//! Item handlers: create, partial update, delete, bulk create

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use packlist_api::{dto, BulkCreateItemsInput, CreateItemInput, UpdateItemInput};
use packlist_storage::{ItemId, Store, TripId, UpdateItemParams};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::{parse_id, JsonInput};
use crate::server::PackListServer;

pub async fn create(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
    JsonInput(input): JsonInput<CreateItemInput>,
) -> Result<(StatusCode, Json<dto::Item>), ApiError> {
    let trip_id = TripId(parse_id("tripId", &raw)?);

    let item = server
        .store
        .create_item(&input.into_params(trip_id))
        .await
        .map_err(ApiError::store("Item"))?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Apply the fields present in the body. An empty body returns the item unchanged.
pub async fn update(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
    JsonInput(input): JsonInput<UpdateItemInput>,
) -> Result<Json<dto::Item>, ApiError> {
    let item_id = ItemId(parse_id("id", &raw)?);
    let params = UpdateItemParams::from(input);

    let item = if params.is_empty() {
        server.store.get_item(item_id).await
    } else {
        server.store.update_item(item_id, &params).await
    }
    .map_err(ApiError::store("Item"))?;

    Ok(Json(item.into()))
}

pub async fn delete(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
) -> Result<StatusCode, ApiError> {
    let item_id = ItemId(parse_id("id", &raw)?);

    let removed = server
        .store
        .delete_item(item_id)
        .await
        .map_err(ApiError::store("Item"))?;

    tracing::debug!(%item_id, removed, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}

/// Create all items in one statement. Nothing is written if any row is rejected.
pub async fn bulk_create(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
    JsonInput(input): JsonInput<BulkCreateItemsInput>,
) -> Result<(StatusCode, Json<Vec<dto::Item>>), ApiError> {
    let trip_id = TripId(parse_id("tripId", &raw)?);
    let params = input.into_params(trip_id);

    let items = server
        .store
        .create_items(&params)
        .await
        .map_err(ApiError::store("Item"))?;

    tracing::debug!(%trip_id, count = items.len(), "bulk created items");
    Ok((
        StatusCode::CREATED,
        Json(items.into_iter().map(dto::Item::from).collect()),
    ))
}
