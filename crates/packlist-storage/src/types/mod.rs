//! Type definitions for packlist storage.

mod aggregates;
mod groups;
mod ids;
mod items;
mod members;
mod saved_lists;
mod trips;

// Re-export all types from submodules
pub use aggregates::*;
pub use groups::*;
pub use ids::*;
pub use items::*;
pub use members::*;
pub use saved_lists::*;
pub use trips::*;
