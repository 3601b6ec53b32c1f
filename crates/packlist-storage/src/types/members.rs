//! Group member types.

use super::{GroupId, MemberId, UserId};

/// Group member record. `user_id` and `email` are reserved for linking a
/// display name to a real account later on.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupMember {
    pub id: MemberId,
    pub group_id: GroupId,
    pub name: String,
    pub user_id: Option<UserId>,
    pub email: Option<String>,
}

/// Parameters for creating a group member
#[derive(Clone, Debug)]
pub struct CreateMemberParams {
    pub group_id: GroupId,
    pub name: String,
    pub user_id: Option<UserId>,
    pub email: Option<String>,
}
