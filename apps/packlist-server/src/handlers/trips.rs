//! Trip handlers: list, get, create, delete

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use packlist_api::{dto, CreateTripInput};
use packlist_storage::{Store, TripId};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::{parse_id, JsonInput};
use crate::server::PackListServer;

pub async fn list(
    State(server): State<PackListServer>,
    Caller(user): Caller,
) -> Result<Json<Vec<dto::Trip>>, ApiError> {
    let trips = server
        .store
        .list_trips(&user)
        .await
        .map_err(ApiError::store("Trip"))?;

    Ok(Json(trips.into_iter().map(dto::Trip::from).collect()))
}

/// Any authenticated caller may read a trip by id; ownership is not checked.
pub async fn get(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
) -> Result<Json<dto::TripDetail>, ApiError> {
    let trip_id = TripId(parse_id("id", &raw)?);

    let detail = server
        .store
        .get_trip(trip_id)
        .await
        .map_err(ApiError::store("Trip"))?;

    Ok(Json(detail.into()))
}

pub async fn create(
    State(server): State<PackListServer>,
    Caller(user): Caller,
    JsonInput(input): JsonInput<CreateTripInput>,
) -> Result<(StatusCode, Json<dto::Trip>), ApiError> {
    // The organizer is always the caller, whatever the body says
    let params = input.into_params(user);

    let trip = server
        .store
        .create_trip(&params)
        .await
        .map_err(ApiError::store("Trip"))?;

    tracing::info!(trip_id = %trip.id, organizer = %trip.organizer_id, "created trip");
    Ok((StatusCode::CREATED, Json(trip.into())))
}

pub async fn delete(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
) -> Result<StatusCode, ApiError> {
    let trip_id = TripId(parse_id("id", &raw)?);

    let removed = server
        .store
        .delete_trip(trip_id)
        .await
        .map_err(ApiError::store("Trip"))?;

    tracing::debug!(%trip_id, removed, "deleted trip");
    Ok(StatusCode::NO_CONTENT)
}
