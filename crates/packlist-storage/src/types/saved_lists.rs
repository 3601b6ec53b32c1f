//! Saved list (reusable template) types.

use chrono::{DateTime, Utc};

use super::{SavedListId, SavedListItemId, UserId};

/// Saved list record
#[derive(Clone, Debug, PartialEq)]
pub struct SavedList {
    pub id: SavedListId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Saved list item record
#[derive(Clone, Debug, PartialEq)]
pub struct SavedListItem {
    pub id: SavedListItemId,
    pub saved_list_id: SavedListId,
    pub name: String,
    pub quantity: i32,
}

/// One item row to create alongside a saved list
#[derive(Clone, Debug, PartialEq)]
pub struct SavedListItemSpec {
    pub name: String,
    pub quantity: i32,
}

/// Parameters for creating a saved list together with its items
#[derive(Clone, Debug)]
pub struct CreateSavedListParams {
    pub user_id: UserId,
    pub name: String,
    pub items: Vec<SavedListItemSpec>,
}

/// Saved list with its items, as returned by list reads
#[derive(Clone, Debug, PartialEq)]
pub struct SavedListWithItems {
    pub list: SavedList,
    pub items: Vec<SavedListItem>,
}
