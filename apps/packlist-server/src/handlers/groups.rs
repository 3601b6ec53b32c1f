//! Group handlers: create within a trip, delete

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use packlist_api::{dto, CreateGroupInput};
use packlist_storage::{GroupId, Store, TripId};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::{parse_id, JsonInput};
use crate::server::PackListServer;

pub async fn create(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
    JsonInput(input): JsonInput<CreateGroupInput>,
) -> Result<(StatusCode, Json<dto::Group>), ApiError> {
    let trip_id = TripId(parse_id("tripId", &raw)?);

    let group = server
        .store
        .create_group(&input.into_params(trip_id))
        .await
        .map_err(ApiError::store("Group"))?;

    Ok((StatusCode::CREATED, Json(group.into())))
}

pub async fn delete(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
) -> Result<StatusCode, ApiError> {
    let group_id = GroupId(parse_id("id", &raw)?);

    let removed = server
        .store
        .delete_group(group_id)
        .await
        .map_err(ApiError::store("Group"))?;

    tracing::debug!(%group_id, removed, "deleted group");
    Ok(StatusCode::NO_CONTENT)
}
