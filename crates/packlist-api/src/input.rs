//! Request payloads.
//!
//! Server-generated fields (ids, timestamps) never appear here. Parent ids
//! come from the URL path and owner ids from the authenticated caller, so
//! each `into_params` takes them as arguments instead of reading the body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use packlist_storage::{
    CreateGroupParams, CreateItemParams, CreateMemberParams, CreateSavedListParams,
    CreateTripParams, GroupId, MemberId, SavedListItemSpec, TripId, UpdateItemParams, UserId,
};

use crate::dates;
use crate::validate::{require_name, Validate, ValidationError};

fn default_quantity() -> i32 {
    1
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ───────────────────────────── Trips ─────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "dates::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "dates::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<DateTime<Utc>>,
    /// Accepted for compatibility and always replaced by the caller's identity.
    #[serde(default, skip_serializing)]
    pub organizer_id: Option<String>,
}

impl Validate for CreateTripInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)
    }
}

impl CreateTripInput {
    pub fn into_params(self, organizer_id: UserId) -> CreateTripParams {
        CreateTripParams {
            name: self.name,
            description: self.description,
            start_date: self.start_date,
            end_date: self.end_date,
            organizer_id,
        }
    }
}

// ───────────────────────────── Groups ─────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupInput {
    #[serde(default)]
    pub name: String,
}

impl Validate for CreateGroupInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)
    }
}

impl CreateGroupInput {
    pub fn into_params(self, trip_id: TripId) -> CreateGroupParams {
        CreateGroupParams {
            trip_id,
            name: self.name,
        }
    }
}

// ───────────────────────────── Members ────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Validate for CreateMemberInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)
    }
}

impl CreateMemberInput {
    pub fn into_params(self, group_id: GroupId) -> CreateMemberParams {
        CreateMemberParams {
            group_id,
            name: self.name,
            user_id: self.user_id.map(UserId),
            email: self.email,
        }
    }
}

// ───────────────────────────── Items ──────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub is_packed: bool,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub assigned_to_member_id: Option<i64>,
}

impl CreateItemInput {
    /// An unpacked item with quantity 1 and no assignment.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: default_quantity(),
            is_packed: false,
            group_id: None,
            assigned_to_member_id: None,
        }
    }

    pub fn into_params(self, trip_id: TripId) -> CreateItemParams {
        CreateItemParams {
            trip_id,
            name: self.name,
            quantity: self.quantity,
            is_packed: self.is_packed,
            group_id: self.group_id.map(GroupId),
            assigned_to_member_id: self.assigned_to_member_id.map(MemberId),
        }
    }
}

impl Validate for CreateItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)
    }
}

/// Partial item update. Absent fields are left alone; `groupId` and
/// `assignedToMemberId` accept an explicit `null` to clear the assignment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_packed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub group_id: Option<Option<i64>>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to_member_id: Option<Option<i64>>,
}

impl Validate for UpdateItemInput {
    fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => require_name("name", name),
            None => Ok(()),
        }
    }
}

impl From<UpdateItemInput> for UpdateItemParams {
    fn from(i: UpdateItemInput) -> Self {
        UpdateItemParams {
            name: i.name,
            quantity: i.quantity,
            is_packed: i.is_packed,
            trip_id: i.trip_id.map(TripId),
            group_id: i.group_id.map(|g| g.map(GroupId)),
            assigned_to_member_id: i.assigned_to_member_id.map(|m| m.map(MemberId)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkCreateItemsInput {
    pub items: Vec<CreateItemInput>,
}

impl Validate for BulkCreateItemsInput {
    fn validate(&self) -> Result<(), ValidationError> {
        for (idx, item) in self.items.iter().enumerate() {
            item.validate().map_err(|e| ValidationError {
                field: e.field.map(|f| format!("items[{idx}].{f}")),
                message: e.message,
            })?;
        }
        Ok(())
    }
}

impl BulkCreateItemsInput {
    pub fn into_params(self, trip_id: TripId) -> Vec<CreateItemParams> {
        self.items
            .into_iter()
            .map(|i| i.into_params(trip_id))
            .collect()
    }
}

// ───────────────────────────── Saved lists ────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedListItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavedListInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<SavedListItemInput>,
}

impl Validate for CreateSavedListInput {
    fn validate(&self) -> Result<(), ValidationError> {
        require_name("name", &self.name)?;
        if self.items.is_empty() {
            return Err(ValidationError::field(
                "items",
                "a saved list needs at least one item",
            ));
        }
        for (idx, item) in self.items.iter().enumerate() {
            require_name(&format!("items[{idx}].name"), &item.name)?;
        }
        Ok(())
    }
}

impl CreateSavedListInput {
    pub fn into_params(self, user_id: UserId) -> CreateSavedListParams {
        CreateSavedListParams {
            user_id,
            name: self.name,
            items: self
                .items
                .into_iter()
                .map(|i| SavedListItemSpec {
                    name: i.name,
                    quantity: i.quantity,
                })
                .collect(),
        }
    }
}

impl crate::dto::SavedListWithItems {
    /// Copy every template item into a group's shared list.
    pub fn import_into_group(&self, group_id: i64) -> BulkCreateItemsInput {
        BulkCreateItemsInput {
            items: self
                .items
                .iter()
                .map(|i| CreateItemInput {
                    quantity: i.quantity,
                    group_id: Some(group_id),
                    ..CreateItemInput::named(i.name.clone())
                })
                .collect(),
        }
    }
}
