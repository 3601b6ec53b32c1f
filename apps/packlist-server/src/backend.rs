use packlist_storage::*;
use packlist_store_postgres::PostgresStore;
use packlist_store_sqlite::SqliteStore;
use std::sync::Arc;

/// StoreBackend abstracts over SQLite and PostgreSQL implementations
#[derive(Clone)]
pub enum StoreBackend {
    Sqlite(Arc<SqliteStore>),
    Postgres(Arc<PostgresStore>),
}

impl StoreBackend {
    /// Open the backend named by the URL scheme and run its migrations.
    pub async fn open(database_url: &str) -> Result<Self, StoreError> {
        if database_url.starts_with("postgres:") || database_url.starts_with("postgresql:") {
            Ok(StoreBackend::Postgres(Arc::new(
                PostgresStore::open(database_url).await?,
            )))
        } else {
            Ok(StoreBackend::Sqlite(Arc::new(
                SqliteStore::open(database_url).await?,
            )))
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite(_) => "sqlite",
            StoreBackend::Postgres(_) => "postgres",
        }
    }

    pub async fn close(&self) {
        match self {
            StoreBackend::Sqlite(s) => s.close().await,
            StoreBackend::Postgres(s) => s.close().await,
        }
    }
}

#[async_trait::async_trait]
impl Store for StoreBackend {
    async fn list_trips(&self, organizer_id: &UserId) -> Result<Vec<Trip>, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.list_trips(organizer_id).await,
            StoreBackend::Postgres(s) => s.list_trips(organizer_id).await,
        }
    }

    async fn get_trip(&self, trip_id: TripId) -> Result<TripDetail, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.get_trip(trip_id).await,
            StoreBackend::Postgres(s) => s.get_trip(trip_id).await,
        }
    }

    async fn create_trip(&self, params: &CreateTripParams) -> Result<Trip, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.create_trip(params).await,
            StoreBackend::Postgres(s) => s.create_trip(params).await,
        }
    }

    async fn delete_trip(&self, trip_id: TripId) -> Result<u64, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.delete_trip(trip_id).await,
            StoreBackend::Postgres(s) => s.delete_trip(trip_id).await,
        }
    }

    async fn create_group(&self, params: &CreateGroupParams) -> Result<Group, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.create_group(params).await,
            StoreBackend::Postgres(s) => s.create_group(params).await,
        }
    }

    async fn delete_group(&self, group_id: GroupId) -> Result<u64, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.delete_group(group_id).await,
            StoreBackend::Postgres(s) => s.delete_group(group_id).await,
        }
    }

    async fn create_member(&self, params: &CreateMemberParams) -> Result<GroupMember, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.create_member(params).await,
            StoreBackend::Postgres(s) => s.create_member(params).await,
        }
    }

    async fn delete_member(&self, member_id: MemberId) -> Result<u64, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.delete_member(member_id).await,
            StoreBackend::Postgres(s) => s.delete_member(member_id).await,
        }
    }

    async fn create_item(&self, params: &CreateItemParams) -> Result<Item, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.create_item(params).await,
            StoreBackend::Postgres(s) => s.create_item(params).await,
        }
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Item, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.get_item(item_id).await,
            StoreBackend::Postgres(s) => s.get_item(item_id).await,
        }
    }

    async fn update_item(
        &self,
        item_id: ItemId,
        params: &UpdateItemParams,
    ) -> Result<Item, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.update_item(item_id, params).await,
            StoreBackend::Postgres(s) => s.update_item(item_id, params).await,
        }
    }

    async fn delete_item(&self, item_id: ItemId) -> Result<u64, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.delete_item(item_id).await,
            StoreBackend::Postgres(s) => s.delete_item(item_id).await,
        }
    }

    async fn create_items(&self, params: &[CreateItemParams]) -> Result<Vec<Item>, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.create_items(params).await,
            StoreBackend::Postgres(s) => s.create_items(params).await,
        }
    }

    async fn list_saved_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SavedListWithItems>, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.list_saved_lists(user_id).await,
            StoreBackend::Postgres(s) => s.list_saved_lists(user_id).await,
        }
    }

    async fn create_saved_list(
        &self,
        params: &CreateSavedListParams,
    ) -> Result<SavedList, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.create_saved_list(params).await,
            StoreBackend::Postgres(s) => s.create_saved_list(params).await,
        }
    }

    async fn delete_saved_list(&self, saved_list_id: SavedListId) -> Result<u64, StoreError> {
        match self {
            StoreBackend::Sqlite(s) => s.delete_saved_list(saved_list_id).await,
            StoreBackend::Postgres(s) => s.delete_saved_list(saved_list_id).await,
        }
    }
}
