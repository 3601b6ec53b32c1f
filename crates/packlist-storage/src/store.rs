//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait the server depends on.
///
/// Trips and saved lists are **scoped by owner** on their list reads. Single-row
/// reads and deletes address rows by id only; ownership checks, where any exist,
/// belong to the caller.
///
/// Delete methods return the number of rows removed and never fail because the
/// target is missing. Child rows go with their parent through the schema's
/// `ON DELETE` rules.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Trips ──────────────────────────────────────────

    /// List all trips organized by a user.
    async fn list_trips(&self, organizer_id: &UserId) -> Result<Vec<Trip>, StoreError>;

    /// Get a trip with its groups (and their members) and items (with their assignee).
    async fn get_trip(&self, trip_id: TripId) -> Result<TripDetail, StoreError>;

    /// Create a trip (returns the stored row).
    async fn create_trip(&self, params: &CreateTripParams) -> Result<Trip, StoreError>;

    /// Delete a trip together with its groups, members and items.
    async fn delete_trip(&self, trip_id: TripId) -> Result<u64, StoreError>;

    // ───────────────────────────────────── Groups ─────────────────────────────────────────

    /// Create a group within a trip.
    async fn create_group(&self, params: &CreateGroupParams) -> Result<Group, StoreError>;

    /// Delete a group together with its members and items.
    async fn delete_group(&self, group_id: GroupId) -> Result<u64, StoreError>;

    // ───────────────────────────────────── Members ────────────────────────────────────────

    /// Add a member to a group.
    async fn create_member(&self, params: &CreateMemberParams) -> Result<GroupMember, StoreError>;

    /// Remove a member. Items assigned to them fall back to their group's shared list.
    async fn delete_member(&self, member_id: MemberId) -> Result<u64, StoreError>;

    // ───────────────────────────────────── Items ──────────────────────────────────────────

    /// Create a single item.
    async fn create_item(&self, params: &CreateItemParams) -> Result<Item, StoreError>;

    /// Get an item by ID.
    async fn get_item(&self, item_id: ItemId) -> Result<Item, StoreError>;

    /// Apply a partial update and return the updated row.
    async fn update_item(
        &self,
        item_id: ItemId,
        params: &UpdateItemParams,
    ) -> Result<Item, StoreError>;

    /// Delete an item.
    async fn delete_item(&self, item_id: ItemId) -> Result<u64, StoreError>;

    /// Create many items in a single statement (all-or-nothing).
    /// Rows come back in input order.
    async fn create_items(&self, params: &[CreateItemParams]) -> Result<Vec<Item>, StoreError>;

    // ───────────────────────────────────── Saved lists ────────────────────────────────────

    /// List a user's saved lists, each with its items.
    async fn list_saved_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SavedListWithItems>, StoreError>;

    /// Create a saved list and its items in one transaction.
    async fn create_saved_list(
        &self,
        params: &CreateSavedListParams,
    ) -> Result<SavedList, StoreError>;

    /// Delete a saved list together with its items.
    async fn delete_saved_list(&self, saved_list_id: SavedListId) -> Result<u64, StoreError>;
}
