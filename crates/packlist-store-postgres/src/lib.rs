use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};
use packlist_storage::{
    CreateGroupParams, CreateItemParams, CreateMemberParams, CreateSavedListParams,
    CreateTripParams, Group, GroupId, GroupMember, Item, ItemId, ItemWithAssignee, MemberId,
    SavedList, SavedListId, SavedListItem, SavedListItemId, SavedListWithItems, Store, StoreError,
    Trip, TripDetail, TripId, UpdateItemParams, UserId,
};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const TRIP_COLUMNS: &str = "id, name, description, start_date, end_date, organizer_id, created_at";
const GROUP_COLUMNS: &str = "id, trip_id, name, created_at";
const MEMBER_COLUMNS: &str = "id, group_id, name, user_id, email";
const ITEM_COLUMNS: &str = "id, trip_id, group_id, assigned_to_member_id, name, quantity, is_packed";
const SAVED_LIST_COLUMNS: &str = "id, user_id, name, created_at";

// The wire protocol carries at most 65535 bind parameters per statement.
const MAX_BIND_PARAMS: usize = 65535;
const ITEM_ROWS_PER_INSERT: usize = MAX_BIND_PARAMS / 6;
const SAVED_LIST_ITEM_ROWS_PER_INSERT: usize = MAX_BIND_PARAMS / 3;

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn open(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        tracing::debug!("postgres store ready");
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn write_error(e: sqlx::Error, parent: impl FnOnce() -> String) -> StoreError {
    match &e {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            StoreError::InvalidReference(parent())
        }
        _ => backend(e),
    }
}

#[derive(sqlx::FromRow)]
struct TripRow {
    id: i64,
    name: String,
    description: Option<String>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    organizer_id: String,
    created_at: DateTime<Utc>,
}

impl From<TripRow> for Trip {
    fn from(r: TripRow) -> Self {
        Trip {
            id: TripId(r.id),
            name: r.name,
            description: r.description,
            start_date: r.start_date,
            end_date: r.end_date,
            organizer_id: UserId(r.organizer_id),
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GroupRow {
    id: i64,
    trip_id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(r: GroupRow) -> Self {
        Group {
            id: GroupId(r.id),
            trip_id: TripId(r.trip_id),
            name: r.name,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: i64,
    group_id: i64,
    name: String,
    user_id: Option<String>,
    email: Option<String>,
}

impl From<MemberRow> for GroupMember {
    fn from(r: MemberRow) -> Self {
        GroupMember {
            id: MemberId(r.id),
            group_id: GroupId(r.group_id),
            name: r.name,
            user_id: r.user_id.map(UserId),
            email: r.email,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i64,
    trip_id: i64,
    group_id: Option<i64>,
    assigned_to_member_id: Option<i64>,
    name: String,
    quantity: i32,
    is_packed: bool,
}

impl From<ItemRow> for Item {
    fn from(r: ItemRow) -> Self {
        Item {
            id: ItemId(r.id),
            trip_id: TripId(r.trip_id),
            group_id: r.group_id.map(GroupId),
            assigned_to_member_id: r.assigned_to_member_id.map(MemberId),
            name: r.name,
            quantity: r.quantity,
            is_packed: r.is_packed,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemAssigneeRow {
    #[sqlx(flatten)]
    item: ItemRow,
    member_id: Option<i64>,
    member_group_id: Option<i64>,
    member_name: Option<String>,
    member_user_id: Option<String>,
    member_email: Option<String>,
}

impl From<ItemAssigneeRow> for ItemWithAssignee {
    fn from(r: ItemAssigneeRow) -> Self {
        let assigned_to = match (r.member_id, r.member_group_id, r.member_name) {
            (Some(id), Some(group_id), Some(name)) => Some(GroupMember {
                id: MemberId(id),
                group_id: GroupId(group_id),
                name,
                user_id: r.member_user_id.map(UserId),
                email: r.member_email,
            }),
            _ => None,
        };
        ItemWithAssignee {
            item: r.item.into(),
            assigned_to,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SavedListRow {
    id: i64,
    user_id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<SavedListRow> for SavedList {
    fn from(r: SavedListRow) -> Self {
        SavedList {
            id: SavedListId(r.id),
            user_id: UserId(r.user_id),
            name: r.name,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SavedListItemRow {
    id: i64,
    saved_list_id: i64,
    name: String,
    quantity: i32,
}

impl From<SavedListItemRow> for SavedListItem {
    fn from(r: SavedListItemRow) -> Self {
        SavedListItem {
            id: SavedListItemId(r.id),
            saved_list_id: SavedListId(r.saved_list_id),
            name: r.name,
            quantity: r.quantity,
        }
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    // ───────────────────────────── Trips ─────────────────────────────

    async fn list_trips(&self, organizer_id: &UserId) -> Result<Vec<Trip>, StoreError> {
        let rows = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE organizer_id = $1 ORDER BY id"
        ))
        .bind(&organizer_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Trip::from).collect())
    }

    async fn get_trip(&self, trip_id: TripId) -> Result<TripDetail, StoreError> {
        // REPEATABLE READ so the four reads see one snapshot.
        let mut tx = self.pool.begin().await.map_err(backend)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(backend)?;

        let trip = sqlx::query_as::<_, TripRow>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE id = $1"
        ))
        .bind(trip_id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(backend)?
        .ok_or(StoreError::NotFound)?;

        let groups = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE trip_id = $1 ORDER BY id"
        ))
        .bind(trip_id.0)
        .fetch_all(&mut *tx)
        .await
        .map_err(backend)?;

        let members = sqlx::query_as::<_, MemberRow>(
            "SELECT m.id, m.group_id, m.name, m.user_id, m.email
               FROM group_members m
               JOIN groups g ON g.id = m.group_id
              WHERE g.trip_id = $1
              ORDER BY m.id",
        )
        .bind(trip_id.0)
        .fetch_all(&mut *tx)
        .await
        .map_err(backend)?;

        let items = sqlx::query_as::<_, ItemAssigneeRow>(
            "SELECT i.id, i.trip_id, i.group_id, i.assigned_to_member_id, i.name, i.quantity, i.is_packed,
                    m.id AS member_id, m.group_id AS member_group_id, m.name AS member_name,
                    m.user_id AS member_user_id, m.email AS member_email
               FROM items i
               LEFT JOIN group_members m ON m.id = i.assigned_to_member_id
              WHERE i.trip_id = $1
              ORDER BY i.id",
        )
        .bind(trip_id.0)
        .fetch_all(&mut *tx)
        .await
        .map_err(backend)?;

        tx.commit().await.map_err(backend)?;

        Ok(TripDetail::assemble(
            trip.into(),
            groups.into_iter().map(Group::from).collect(),
            members.into_iter().map(GroupMember::from).collect(),
            items.into_iter().map(ItemWithAssignee::from).collect(),
        ))
    }

    async fn create_trip(&self, params: &CreateTripParams) -> Result<Trip, StoreError> {
        let row = sqlx::query_as::<_, TripRow>(&format!(
            "INSERT INTO trips(name, description, start_date, end_date, organizer_id)
             VALUES($1, $2, $3, $4, $5)
             RETURNING {TRIP_COLUMNS}"
        ))
        .bind(&params.name)
        .bind(&params.description)
        .bind(params.start_date)
        .bind(params.end_date)
        .bind(&params.organizer_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into())
    }

    async fn delete_trip(&self, trip_id: TripId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(trip_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }

    // ───────────────────────────── Groups ─────────────────────────────

    async fn create_group(&self, params: &CreateGroupParams) -> Result<Group, StoreError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "INSERT INTO groups(trip_id, name) VALUES($1, $2) RETURNING {GROUP_COLUMNS}"
        ))
        .bind(params.trip_id.0)
        .bind(&params.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, || format!("trip {}", params.trip_id)))?;

        Ok(row.into())
    }

    async fn delete_group(&self, group_id: GroupId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(group_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }

    // ───────────────────────────── Members ────────────────────────────

    async fn create_member(&self, params: &CreateMemberParams) -> Result<GroupMember, StoreError> {
        let row = sqlx::query_as::<_, MemberRow>(&format!(
            "INSERT INTO group_members(group_id, name, user_id, email) VALUES($1, $2, $3, $4)
             RETURNING {MEMBER_COLUMNS}"
        ))
        .bind(params.group_id.0)
        .bind(&params.name)
        .bind(params.user_id.as_ref().map(|u| u.0.as_str()))
        .bind(&params.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, || format!("group {}", params.group_id)))?;

        Ok(row.into())
    }

    async fn delete_member(&self, member_id: MemberId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM group_members WHERE id = $1")
            .bind(member_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }

    // ───────────────────────────── Items ──────────────────────────────

    async fn create_item(&self, params: &CreateItemParams) -> Result<Item, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "INSERT INTO items(trip_id, group_id, assigned_to_member_id, name, quantity, is_packed)
             VALUES($1, $2, $3, $4, $5, $6)
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(params.trip_id.0)
        .bind(params.group_id.map(|g| g.0))
        .bind(params.assigned_to_member_id.map(|m| m.0))
        .bind(&params.name)
        .bind(params.quantity)
        .bind(params.is_packed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, || item_parents(params)))?;

        Ok(row.into())
    }

    async fn get_item(&self, item_id: ItemId) -> Result<Item, StoreError> {
        sqlx::query_as::<_, ItemRow>(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"))
            .bind(item_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?
            .map(Item::from)
            .ok_or(StoreError::NotFound)
    }

    async fn update_item(
        &self,
        item_id: ItemId,
        params: &UpdateItemParams,
    ) -> Result<Item, StoreError> {
        if params.is_empty() {
            return self.get_item(item_id).await;
        }

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE items SET ");
        let mut set = qb.separated(", ");
        if let Some(name) = &params.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(quantity) = params.quantity {
            set.push("quantity = ").push_bind_unseparated(quantity);
        }
        if let Some(is_packed) = params.is_packed {
            set.push("is_packed = ").push_bind_unseparated(is_packed);
        }
        if let Some(trip_id) = params.trip_id {
            set.push("trip_id = ").push_bind_unseparated(trip_id.0);
        }
        if let Some(group_id) = params.group_id {
            set.push("group_id = ")
                .push_bind_unseparated(group_id.map(|g| g.0));
        }
        if let Some(member_id) = params.assigned_to_member_id {
            set.push("assigned_to_member_id = ")
                .push_bind_unseparated(member_id.map(|m| m.0));
        }
        qb.push(" WHERE id = ")
            .push_bind(item_id.0)
            .push(format!(" RETURNING {ITEM_COLUMNS}"));

        qb.build_query_as::<ItemRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, || "trip, group or member".to_string()))?
            .map(Item::from)
            .ok_or(StoreError::NotFound)
    }

    async fn delete_item(&self, item_id: ItemId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(item_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }

    async fn create_items(&self, params: &[CreateItemParams]) -> Result<Vec<Item>, StoreError> {
        if params.is_empty() {
            return Ok(Vec::new());
        }

        // Large batches span several statements; the transaction keeps them all-or-nothing.
        let mut tx = self.pool.begin().await.map_err(backend)?;
        let mut rows = Vec::with_capacity(params.len());
        for chunk in params.chunks(ITEM_ROWS_PER_INSERT) {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO items(trip_id, group_id, assigned_to_member_id, name, quantity, is_packed) ",
            );
            qb.push_values(chunk, |mut row, p| {
                row.push_bind(p.trip_id.0)
                    .push_bind(p.group_id.map(|g| g.0))
                    .push_bind(p.assigned_to_member_id.map(|m| m.0))
                    .push_bind(p.name.clone())
                    .push_bind(p.quantity)
                    .push_bind(p.is_packed);
            });
            qb.push(format!(" RETURNING {ITEM_COLUMNS}"));

            let chunk_rows = qb
                .build_query_as::<ItemRow>()
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| write_error(e, || "trip, group or member".to_string()))?;
            rows.extend(chunk_rows);
        }
        tx.commit().await.map_err(backend)?;

        // RETURNING order is unspecified; ids are handed out in VALUES order.
        rows.sort_by_key(|r| r.id);
        Ok(rows.into_iter().map(Item::from).collect())
    }

    // ───────────────────────────── Saved lists ────────────────────────

    async fn list_saved_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SavedListWithItems>, StoreError> {
        let lists = sqlx::query_as::<_, SavedListRow>(&format!(
            "SELECT {SAVED_LIST_COLUMNS} FROM saved_lists WHERE user_id = $1 ORDER BY id"
        ))
        .bind(&user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        let items = sqlx::query_as::<_, SavedListItemRow>(
            "SELECT si.id, si.saved_list_id, si.name, si.quantity
               FROM saved_list_items si
               JOIN saved_lists s ON s.id = si.saved_list_id
              WHERE s.user_id = $1
              ORDER BY si.id",
        )
        .bind(&user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(SavedListWithItems::assemble(
            lists.into_iter().map(SavedList::from).collect(),
            items.into_iter().map(SavedListItem::from).collect(),
        ))
    }

    async fn create_saved_list(
        &self,
        params: &CreateSavedListParams,
    ) -> Result<SavedList, StoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        let list = sqlx::query_as::<_, SavedListRow>(&format!(
            "INSERT INTO saved_lists(user_id, name) VALUES($1, $2) RETURNING {SAVED_LIST_COLUMNS}"
        ))
        .bind(&params.user_id.0)
        .bind(&params.name)
        .fetch_one(&mut *tx)
        .await
        .map_err(backend)?;

        for chunk in params.items.chunks(SAVED_LIST_ITEM_ROWS_PER_INSERT) {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO saved_list_items(saved_list_id, name, quantity) ",
            );
            qb.push_values(chunk, |mut row, item| {
                row.push_bind(list.id)
                    .push_bind(item.name.clone())
                    .push_bind(item.quantity);
            });
            qb.build().execute(&mut *tx).await.map_err(backend)?;
        }

        tx.commit().await.map_err(backend)?;
        Ok(list.into())
    }

    async fn delete_saved_list(&self, saved_list_id: SavedListId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM saved_lists WHERE id = $1")
            .bind(saved_list_id.0)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }
}

fn item_parents(params: &CreateItemParams) -> String {
    let mut parts = vec![format!("trip {}", params.trip_id)];
    if let Some(g) = params.group_id {
        parts.push(format!("group {g}"));
    }
    if let Some(m) = params.assigned_to_member_id {
        parts.push(format!("member {m}"));
    }
    parts.join(", ")
}
