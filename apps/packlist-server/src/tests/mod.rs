//! Server unit and integration tests.
//!
//! Tests are organized into modules by feature area:
//! - `common` - Shared test helpers (in-memory server, request helpers)
//! - `store_backend` - Storage backend dispatch tests
//! - `handlers` - HTTP handler tests driven through the router
//! - `serve` - Listener, health, readiness and metrics endpoints
