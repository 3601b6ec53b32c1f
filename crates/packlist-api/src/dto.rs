//! JSON response shapes.
//!
//! Field names are camelCase on the wire. Composite shapes flatten the parent
//! record and add their children alongside (`{ ...trip, groups, items }`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use packlist_storage as storage;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub organizer_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    pub user_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub trip_id: i64,
    pub group_id: Option<i64>,
    pub assigned_to_member_id: Option<i64>,
    pub name: String,
    pub quantity: i32,
    pub is_packed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedList {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedListItem {
    pub id: i64,
    pub saved_list_id: i64,
    pub name: String,
    pub quantity: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupWithMembers {
    #[serde(flatten)]
    pub group: Group,
    pub members: Vec<GroupMember>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithAssignee {
    #[serde(flatten)]
    pub item: Item,
    pub assigned_to: Option<GroupMember>,
}

/// Response body of `GET /api/trips/:id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetail {
    #[serde(flatten)]
    pub trip: Trip,
    pub groups: Vec<GroupWithMembers>,
    pub items: Vec<ItemWithAssignee>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedListWithItems {
    #[serde(flatten)]
    pub list: SavedList,
    pub items: Vec<SavedListItem>,
}

impl TripDetail {
    /// Items shared by a whole group (no member assigned).
    pub fn shared_items(&self, group_id: i64) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .map(|i| &i.item)
            .filter(move |i| i.group_id == Some(group_id) && i.assigned_to_member_id.is_none())
    }

    pub fn member_items(&self, member_id: i64) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .map(|i| &i.item)
            .filter(move |i| i.assigned_to_member_id == Some(member_id))
    }
}

// ───────────────────────────── Conversions ─────────────────────────────

impl From<storage::Trip> for Trip {
    fn from(t: storage::Trip) -> Self {
        Self {
            id: t.id.0,
            name: t.name,
            description: t.description,
            start_date: t.start_date,
            end_date: t.end_date,
            organizer_id: t.organizer_id.0,
            created_at: t.created_at,
        }
    }
}

impl From<storage::Group> for Group {
    fn from(g: storage::Group) -> Self {
        Self {
            id: g.id.0,
            trip_id: g.trip_id.0,
            name: g.name,
            created_at: g.created_at,
        }
    }
}

impl From<storage::GroupMember> for GroupMember {
    fn from(m: storage::GroupMember) -> Self {
        Self {
            id: m.id.0,
            group_id: m.group_id.0,
            name: m.name,
            user_id: m.user_id.map(|u| u.0),
            email: m.email,
        }
    }
}

impl From<storage::Item> for Item {
    fn from(i: storage::Item) -> Self {
        Self {
            id: i.id.0,
            trip_id: i.trip_id.0,
            group_id: i.group_id.map(|g| g.0),
            assigned_to_member_id: i.assigned_to_member_id.map(|m| m.0),
            name: i.name,
            quantity: i.quantity,
            is_packed: i.is_packed,
        }
    }
}

impl From<storage::SavedList> for SavedList {
    fn from(l: storage::SavedList) -> Self {
        Self {
            id: l.id.0,
            user_id: l.user_id.0,
            name: l.name,
            created_at: l.created_at,
        }
    }
}

impl From<storage::SavedListItem> for SavedListItem {
    fn from(i: storage::SavedListItem) -> Self {
        Self {
            id: i.id.0,
            saved_list_id: i.saved_list_id.0,
            name: i.name,
            quantity: i.quantity,
        }
    }
}

impl From<storage::TripDetail> for TripDetail {
    fn from(d: storage::TripDetail) -> Self {
        Self {
            trip: d.trip.into(),
            groups: d
                .groups
                .into_iter()
                .map(|g| GroupWithMembers {
                    group: g.group.into(),
                    members: g.members.into_iter().map(Into::into).collect(),
                })
                .collect(),
            items: d
                .items
                .into_iter()
                .map(|i| ItemWithAssignee {
                    item: i.item.into(),
                    assigned_to: i.assigned_to.map(Into::into),
                })
                .collect(),
        }
    }
}

impl From<storage::SavedListWithItems> for SavedListWithItems {
    fn from(l: storage::SavedListWithItems) -> Self {
        Self {
            list: l.list.into(),
            items: l.items.into_iter().map(Into::into).collect(),
        }
    }
}
