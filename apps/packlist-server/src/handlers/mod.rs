//! HTTP handlers, one module per resource:
//! - trips: list, get (with groups, members and items), create, delete
//! - groups: create, delete
//! - members: create, delete
//! - items: create, update, delete, bulk create
//! - saved_lists: list, create, delete
//!
//! Every handler takes the authenticated [`Caller`](crate::auth::Caller), so a
//! request without an identity is rejected before any store access.

pub mod groups;
pub mod items;
pub mod members;
pub mod saved_lists;
pub mod trips;
