//! Packing item types.

use super::{GroupId, ItemId, MemberId, TripId};

/// Item record. Every item belongs to exactly one trip; the two optional
/// foreign keys decide who is expected to pack it (see [`ItemAssignment`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub trip_id: TripId,
    pub group_id: Option<GroupId>,
    pub assigned_to_member_id: Option<MemberId>,
    pub name: String,
    pub quantity: i32,
    pub is_packed: bool,
}

/// Who an item is assigned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemAssignment {
    /// Neither group nor member set: a trip-level item.
    Unassigned,
    /// Shared by everyone in the group.
    Group(GroupId),
    /// Assigned to one member. The member's own group is not checked against
    /// `group_id`, so a mismatched pair is representable.
    Member {
        group_id: Option<GroupId>,
        member_id: MemberId,
    },
}

impl Item {
    pub fn assignment(&self) -> ItemAssignment {
        match (self.group_id, self.assigned_to_member_id) {
            (_, Some(member_id)) => ItemAssignment::Member {
                group_id: self.group_id,
                member_id,
            },
            (Some(group_id), None) => ItemAssignment::Group(group_id),
            (None, None) => ItemAssignment::Unassigned,
        }
    }
}

/// Parameters for creating an item
#[derive(Clone, Debug, PartialEq)]
pub struct CreateItemParams {
    pub trip_id: TripId,
    pub name: String,
    pub quantity: i32,
    pub is_packed: bool,
    pub group_id: Option<GroupId>,
    pub assigned_to_member_id: Option<MemberId>,
}

/// Partial update of an item. `None` leaves a field untouched; for the nullable
/// foreign keys `Some(None)` clears the column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItemParams {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub is_packed: Option<bool>,
    pub trip_id: Option<TripId>,
    pub group_id: Option<Option<GroupId>>,
    pub assigned_to_member_id: Option<Option<MemberId>>,
}

impl UpdateItemParams {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.is_packed.is_none()
            && self.trip_id.is_none()
            && self.group_id.is_none()
            && self.assigned_to_member_id.is_none()
    }
}
