//! Storage abstraction for packlist.
//!
//! Backend crates (packlist-store-sqlite, packlist-store-postgres) implement the [`Store`]
//! trait so the server never depends on a specific database engine or schema detail.

use thiserror::Error;

mod store;
pub mod types;

pub use store::Store;
pub use types::*;

/// Uniform error type for all storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    /// A foreign key named a row that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    #[error("backend error: {0}")]
    Backend(String),
}
