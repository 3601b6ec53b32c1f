//! The HTTP contract: one entry per operation.
//!
//! The server mounts its routes from [`ENDPOINTS`] and the client builds its
//! requests from the same entries, so method, path and payload types cannot
//! drift between the two.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dto;
use crate::input::{
    BulkCreateItemsInput, CreateGroupInput, CreateItemInput, CreateMemberInput,
    CreateSavedListInput, CreateTripInput, UpdateItemInput,
};
use crate::validate::{Validate, ValidationError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation of the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Stable operation name, e.g. `trips.get`. Used as a metrics label.
    pub name: &'static str,
    pub method: Method,
    /// Path template with `:name` placeholders.
    pub path: &'static str,
    pub success_status: u16,
    /// Client-error statuses the operation can answer with (besides 500).
    pub error_statuses: &'static [u16],
    /// Whether the request carries a JSON body.
    pub has_body: bool,
}

impl Endpoint {
    /// The path in the router's `{name}` placeholder syntax.
    pub fn route_template(&self) -> String {
        self.path
            .split('/')
            .map(|seg| match seg.strip_prefix(':') {
                Some(name) => format!("{{{name}}}"),
                None => seg.to_string(),
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Names of the path placeholders, in order.
    pub fn path_params(&self) -> Vec<&'static str> {
        self.path
            .split('/')
            .filter_map(|seg| seg.strip_prefix(':'))
            .collect()
    }

    pub fn url(&self, params: &[(&str, &dyn fmt::Display)]) -> String {
        build_url(self.path, params)
    }
}

/// Substitute `:key` placeholders. Values are interpolated as-is (no escaping)
/// and keys missing from `path` are ignored.
pub fn build_url(path: &str, params: &[(&str, &dyn fmt::Display)]) -> String {
    let mut url = path.to_string();
    for (key, value) in params {
        let placeholder = format!(":{key}");
        if url.contains(&placeholder) {
            url = url.replacen(&placeholder, &value.to_string(), 1);
        }
    }
    url
}

/// Binds an endpoint to its request and response payload types.
pub trait Operation {
    const ENDPOINT: Endpoint;
    type Input: Serialize + DeserializeOwned + Validate + Send + Sync;
    type Output: Serialize + DeserializeOwned + Send;
}

/// Bodyless requests validate trivially.
impl Validate for () {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

macro_rules! operation {
    (@body Get) => { false };
    (@body Delete) => { false };
    (@body Post) => { true };
    (@body Patch) => { true };
    (
        $(#[$doc:meta])*
        $ty:ident = $name:literal, $method:ident $path:literal,
        $status:literal, [$($err:literal),*], $input:ty => $output:ty
    ) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug)]
        pub struct $ty;

        impl $crate::registry::Operation for $ty {
            const ENDPOINT: $crate::registry::Endpoint = $crate::registry::Endpoint {
                name: $name,
                method: $crate::registry::Method::$method,
                path: $path,
                success_status: $status,
                error_statuses: &[$($err),*],
                has_body: operation!(@body $method),
            };
            type Input = $input;
            type Output = $output;
        }
    };
}

pub mod trips {
    use super::*;

    operation! {
        /// Trips organized by the caller.
        List = "trips.list", Get "/api/trips", 200, [401], () => Vec<dto::Trip>
    }
    operation! {
        /// A trip with its groups (and members) and items. Not owner-checked.
        Get = "trips.get", Get "/api/trips/:id", 200, [400, 401, 404], () => dto::TripDetail
    }
    operation! {
        Create = "trips.create", Post "/api/trips", 201, [400, 401], CreateTripInput => dto::Trip
    }
    operation! {
        Delete = "trips.delete", Delete "/api/trips/:id", 204, [400, 401], () => ()
    }
}

pub mod groups {
    use super::*;

    operation! {
        Create = "groups.create", Post "/api/trips/:tripId/groups", 201, [400, 401, 404],
        CreateGroupInput => dto::Group
    }
    operation! {
        Delete = "groups.delete", Delete "/api/groups/:id", 204, [400, 401], () => ()
    }
}

pub mod members {
    use super::*;

    operation! {
        Create = "members.create", Post "/api/groups/:groupId/members", 201, [400, 401, 404],
        CreateMemberInput => dto::GroupMember
    }
    operation! {
        Delete = "members.delete", Delete "/api/members/:id", 204, [400, 401], () => ()
    }
}

pub mod items {
    use super::*;

    operation! {
        Create = "items.create", Post "/api/trips/:tripId/items", 201, [400, 401, 404],
        CreateItemInput => dto::Item
    }
    operation! {
        /// Partial update; any subset of the mutable fields.
        Update = "items.update", Patch "/api/items/:id", 200, [400, 401, 404],
        UpdateItemInput => dto::Item
    }
    operation! {
        Delete = "items.delete", Delete "/api/items/:id", 204, [400, 401], () => ()
    }
    operation! {
        /// Every item inherits the trip id from the path.
        BulkCreate = "items.bulkCreate", Post "/api/trips/:tripId/items/bulk", 201, [400, 401, 404],
        BulkCreateItemsInput => Vec<dto::Item>
    }
}

pub mod saved_lists {
    use super::*;

    operation! {
        List = "savedLists.list", Get "/api/saved-lists", 200, [401],
        () => Vec<dto::SavedListWithItems>
    }
    operation! {
        /// The list and its items are created together.
        Create = "savedLists.create", Post "/api/saved-lists", 201, [400, 401],
        CreateSavedListInput => dto::SavedList
    }
    operation! {
        Delete = "savedLists.delete", Delete "/api/saved-lists/:id", 204, [400, 401], () => ()
    }
}

pub static ENDPOINTS: [Endpoint; 15] = [
    <trips::List as Operation>::ENDPOINT,
    <trips::Get as Operation>::ENDPOINT,
    <trips::Create as Operation>::ENDPOINT,
    <trips::Delete as Operation>::ENDPOINT,
    <groups::Create as Operation>::ENDPOINT,
    <groups::Delete as Operation>::ENDPOINT,
    <members::Create as Operation>::ENDPOINT,
    <members::Delete as Operation>::ENDPOINT,
    <items::Create as Operation>::ENDPOINT,
    <items::Update as Operation>::ENDPOINT,
    <items::Delete as Operation>::ENDPOINT,
    <items::BulkCreate as Operation>::ENDPOINT,
    <saved_lists::List as Operation>::ENDPOINT,
    <saved_lists::Create as Operation>::ENDPOINT,
    <saved_lists::Delete as Operation>::ENDPOINT,
];

pub fn endpoint(name: &str) -> Option<&'static Endpoint> {
    ENDPOINTS.iter().find(|e| e.name == name)
}
