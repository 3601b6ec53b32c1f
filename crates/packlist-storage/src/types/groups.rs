//! Travel group types (a family or party within a trip).

use chrono::{DateTime, Utc};

use super::{GroupId, TripId};

/// Group record
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub trip_id: TripId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a group
#[derive(Clone, Debug)]
pub struct CreateGroupParams {
    pub trip_id: TripId,
    pub name: String,
}
