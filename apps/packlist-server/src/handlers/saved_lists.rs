//! Saved list handlers. Lists are reusable templates owned by a single user.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use packlist_api::{dto, CreateSavedListInput};
use packlist_storage::{SavedListId, Store};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::{parse_id, JsonInput};
use crate::server::PackListServer;

pub async fn list(
    State(server): State<PackListServer>,
    Caller(user): Caller,
) -> Result<Json<Vec<dto::SavedListWithItems>>, ApiError> {
    let lists = server
        .store
        .list_saved_lists(&user)
        .await
        .map_err(ApiError::store("Saved list"))?;

    Ok(Json(
        lists.into_iter().map(dto::SavedListWithItems::from).collect(),
    ))
}

pub async fn create(
    State(server): State<PackListServer>,
    Caller(user): Caller,
    JsonInput(input): JsonInput<CreateSavedListInput>,
) -> Result<(StatusCode, Json<dto::SavedList>), ApiError> {
    let list = server
        .store
        .create_saved_list(&input.into_params(user))
        .await
        .map_err(ApiError::store("Saved list"))?;

    tracing::info!(saved_list_id = %list.id, "created saved list");
    Ok((StatusCode::CREATED, Json(list.into())))
}

pub async fn delete(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
) -> Result<StatusCode, ApiError> {
    let saved_list_id = SavedListId(parse_id("id", &raw)?);

    let removed = server
        .store
        .delete_saved_list(saved_list_id)
        .await
        .map_err(ApiError::store("Saved list"))?;

    tracing::debug!(%saved_list_id, removed, "deleted saved list");
    Ok(StatusCode::NO_CONTENT)
}
