//! Member handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use packlist_api::{dto, CreateMemberInput};
use packlist_storage::{GroupId, MemberId, Store};

use crate::auth::Caller;
use crate::error::ApiError;
use crate::extract::{parse_id, JsonInput};
use crate::server::PackListServer;

pub async fn create(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
    JsonInput(input): JsonInput<CreateMemberInput>,
) -> Result<(StatusCode, Json<dto::GroupMember>), ApiError> {
    let group_id = GroupId(parse_id("groupId", &raw)?);

    let member = server
        .store
        .create_member(&input.into_params(group_id))
        .await
        .map_err(ApiError::store("Member"))?;

    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Items assigned to the member stay in the trip, moved to the group's shared list.
pub async fn delete(
    State(server): State<PackListServer>,
    Caller(_user): Caller,
    Path(raw): Path<String>,
) -> Result<StatusCode, ApiError> {
    let member_id = MemberId(parse_id("id", &raw)?);

    let removed = server
        .store
        .delete_member(member_id)
        .await
        .map_err(ApiError::store("Member"))?;

    tracing::debug!(%member_id, removed, "deleted member");
    Ok(StatusCode::NO_CONTENT)
}
