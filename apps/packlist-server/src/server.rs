use crate::backend::StoreBackend;
use crate::config::ServerConfig;
use crate::handlers;
use crate::metrics;
use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::routing::{delete, get, patch, post, MethodRouter};
use axum::Router;
use packlist_api::registry::{groups, items, members, saved_lists, trips};
use packlist_api::{Method, Operation};
use packlist_store_postgres::PostgresStore;
use packlist_store_sqlite::SqliteStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state: the store handle and the loaded configuration.
#[derive(Clone)]
pub struct PackListServer {
    pub store: StoreBackend,
    pub config: Arc<ServerConfig>,
}

impl PackListServer {
    pub fn new(store: StoreBackend, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn new_sqlite(store: Arc<SqliteStore>, config: ServerConfig) -> Self {
        Self::new(StoreBackend::Sqlite(store), config)
    }

    pub fn new_postgres(store: Arc<PostgresStore>, config: ServerConfig) -> Self {
        Self::new(StoreBackend::Postgres(store), config)
    }

    /// The API router with tracing, metrics and the body limit applied.
    pub fn router(self) -> Router {
        let max_body = self.config.max_body_bytes;
        api_routes()
            .layer(axum::middleware::from_fn(metrics::track))
            .layer(DefaultBodyLimit::max(max_body))
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }
}

/// Mount `handler` at the method and path the registry declares for `O`.
fn mount<O, H, T>(router: Router<PackListServer>, handler: H) -> Router<PackListServer>
where
    O: Operation,
    H: Handler<T, PackListServer>,
    T: 'static,
{
    let endpoint = O::ENDPOINT;
    let method_router: MethodRouter<PackListServer> = match endpoint.method {
        Method::Get => get(handler),
        Method::Post => post(handler),
        Method::Patch => patch(handler),
        Method::Delete => delete(handler),
    };
    router.route(&endpoint.route_template(), method_router)
}

fn api_routes() -> Router<PackListServer> {
    let router = Router::new();

    let router = mount::<trips::List, _, _>(router, handlers::trips::list);
    let router = mount::<trips::Get, _, _>(router, handlers::trips::get);
    let router = mount::<trips::Create, _, _>(router, handlers::trips::create);
    let router = mount::<trips::Delete, _, _>(router, handlers::trips::delete);

    let router = mount::<groups::Create, _, _>(router, handlers::groups::create);
    let router = mount::<groups::Delete, _, _>(router, handlers::groups::delete);

    let router = mount::<members::Create, _, _>(router, handlers::members::create);
    let router = mount::<members::Delete, _, _>(router, handlers::members::delete);

    let router = mount::<items::Create, _, _>(router, handlers::items::create);
    let router = mount::<items::Update, _, _>(router, handlers::items::update);
    let router = mount::<items::Delete, _, _>(router, handlers::items::delete);
    let router = mount::<items::BulkCreate, _, _>(router, handlers::items::bulk_create);

    let router = mount::<saved_lists::List, _, _>(router, handlers::saved_lists::list);
    let router = mount::<saved_lists::Create, _, _>(router, handlers::saved_lists::create);
    mount::<saved_lists::Delete, _, _>(router, handlers::saved_lists::delete)
}
