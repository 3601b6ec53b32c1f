//! Composite read shapes.
//!
//! [`TripDetail`] is what the trip page renders: the trip row, every group with
//! its members, and every item of the trip with the member it is assigned to.
//! Groups, members and items are ordered by ascending id.

use std::collections::HashMap;

use super::{
    Group, GroupId, GroupMember, Item, MemberId, SavedList, SavedListItem, SavedListWithItems,
    Trip,
};

/// A group together with its members
#[derive(Clone, Debug, PartialEq)]
pub struct GroupWithMembers {
    pub group: Group,
    pub members: Vec<GroupMember>,
}

/// An item together with the member it is assigned to (if any)
#[derive(Clone, Debug, PartialEq)]
pub struct ItemWithAssignee {
    pub item: Item,
    pub assigned_to: Option<GroupMember>,
}

/// Trip aggregate returned by `Store::get_trip`
#[derive(Clone, Debug, PartialEq)]
pub struct TripDetail {
    pub trip: Trip,
    pub groups: Vec<GroupWithMembers>,
    pub items: Vec<ItemWithAssignee>,
}

/// Packed/total counter for a slice of a trip's items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackingProgress {
    pub packed: usize,
    pub total: usize,
}

impl PackingProgress {
    fn of<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        items
            .into_iter()
            .fold(PackingProgress::default(), |mut acc, item| {
                acc.total += 1;
                if item.is_packed {
                    acc.packed += 1;
                }
                acc
            })
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.packed == self.total
    }
}

impl TripDetail {
    /// Nest members under their groups. Inputs are expected in id order; members
    /// whose group is not in `groups` are dropped.
    pub fn assemble(
        trip: Trip,
        groups: Vec<Group>,
        members: Vec<GroupMember>,
        items: Vec<ItemWithAssignee>,
    ) -> Self {
        let mut by_group: HashMap<GroupId, Vec<GroupMember>> = HashMap::new();
        for member in members {
            by_group.entry(member.group_id).or_default().push(member);
        }
        let groups = groups
            .into_iter()
            .map(|group| GroupWithMembers {
                members: by_group.remove(&group.id).unwrap_or_default(),
                group,
            })
            .collect();
        Self {
            trip,
            groups,
            items,
        }
    }

    pub fn group(&self, group_id: GroupId) -> Option<&GroupWithMembers> {
        self.groups.iter().find(|g| g.group.id == group_id)
    }

    /// Items shared by a whole group: `group_id` matches and no member is set.
    pub fn shared_items(&self, group_id: GroupId) -> Vec<&Item> {
        self.items
            .iter()
            .map(|i| &i.item)
            .filter(|i| i.group_id == Some(group_id) && i.assigned_to_member_id.is_none())
            .collect()
    }

    /// Items assigned to one member.
    pub fn member_items(&self, member_id: MemberId) -> Vec<&Item> {
        self.items
            .iter()
            .map(|i| &i.item)
            .filter(|i| i.assigned_to_member_id == Some(member_id))
            .collect()
    }

    /// Trip-level items with neither a group nor a member.
    pub fn unassigned_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .map(|i| &i.item)
            .filter(|i| i.group_id.is_none() && i.assigned_to_member_id.is_none())
            .collect()
    }

    pub fn member_progress(&self, member_id: MemberId) -> PackingProgress {
        PackingProgress::of(self.member_items(member_id))
    }

    pub fn progress(&self) -> PackingProgress {
        PackingProgress::of(self.items.iter().map(|i| &i.item))
    }
}

impl SavedListWithItems {
    /// Attach items to their lists, preserving the order of both inputs.
    pub fn assemble(lists: Vec<SavedList>, items: Vec<SavedListItem>) -> Vec<Self> {
        let mut by_list: HashMap<_, Vec<SavedListItem>> = HashMap::new();
        for item in items {
            by_list.entry(item.saved_list_id).or_default().push(item);
        }
        lists
            .into_iter()
            .map(|list| Self {
                items: by_list.remove(&list.id).unwrap_or_default(),
                list,
            })
            .collect()
    }
}
