//! Typed HTTP client for the packlist API.
//!
//! Every call goes through [`PackListClient::send`], which takes its method,
//! path and payload types from a [`packlist_api::Operation`].

use std::fmt::Display;

use packlist_api::dto::{
    Group, GroupMember, Item, SavedList, SavedListWithItems, Trip, TripDetail,
};
use packlist_api::registry::{groups, items, members, saved_lists, trips};
use packlist_api::{
    BulkCreateItemsInput, CreateGroupInput, CreateItemInput, CreateMemberInput,
    CreateSavedListInput, CreateTripInput, ErrorBody, Method, Operation, UpdateItemInput,
};

/// Header the server reads the caller's identity from unless configured otherwise.
pub const DEFAULT_AUTH_HEADER: &str = "x-auth-subject";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{status}: {message}")]
    Api {
        status: u16,
        message: String,
        field: Option<String>,
    },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PackListClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
    subject: String,
}

impl PackListClient {
    /// Client acting as `subject` against a server at `base_url`.
    pub fn new(base_url: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, subject)
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            subject: subject.into(),
        }
    }

    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self
    }

    /// Issue one operation. `params` fill the path placeholders; `input` is
    /// sent as the JSON body when the endpoint takes one.
    pub async fn send<O: Operation>(
        &self,
        params: &[(&str, &dyn Display)],
        input: &O::Input,
    ) -> Result<O::Output, ClientError> {
        let endpoint = O::ENDPOINT;
        let url = format!("{}{}", self.base_url, endpoint.url(params));
        let method = match endpoint.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self
            .http
            .request(method, &url)
            .header(self.auth_header.as_str(), self.subject.as_str());
        if endpoint.has_body {
            request = request.json(input);
        }

        tracing::debug!(operation = endpoint.name, %url, "sending request");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            let error = serde_json::from_str::<ErrorBody>(&body)
                .unwrap_or_else(|_| ErrorBody::new(body));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: error.message,
                field: error.field,
            });
        }

        if status == reqwest::StatusCode::NO_CONTENT {
            return serde_json::from_value(serde_json::Value::Null)
                .map_err(|e| ClientError::Decode(e.to_string()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    // ───────────────────────────── Trips ─────────────────────────────

    pub async fn list_trips(&self) -> Result<Vec<Trip>, ClientError> {
        self.send::<trips::List>(&[], &()).await
    }

    /// `None` when the trip does not exist.
    pub async fn get_trip(&self, trip_id: i64) -> Result<Option<TripDetail>, ClientError> {
        match self.send::<trips::Get>(&[("id", &trip_id)], &()).await {
            Ok(detail) => Ok(Some(detail)),
            Err(ClientError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_trip(&self, input: &CreateTripInput) -> Result<Trip, ClientError> {
        self.send::<trips::Create>(&[], input).await
    }

    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), ClientError> {
        self.send::<trips::Delete>(&[("id", &trip_id)], &()).await
    }

    // ───────────────────────────── Groups ────────────────────────────

    pub async fn create_group(
        &self,
        trip_id: i64,
        input: &CreateGroupInput,
    ) -> Result<Group, ClientError> {
        self.send::<groups::Create>(&[("tripId", &trip_id)], input)
            .await
    }

    pub async fn delete_group(&self, group_id: i64) -> Result<(), ClientError> {
        self.send::<groups::Delete>(&[("id", &group_id)], &()).await
    }

    // ───────────────────────────── Members ───────────────────────────

    pub async fn create_member(
        &self,
        group_id: i64,
        input: &CreateMemberInput,
    ) -> Result<GroupMember, ClientError> {
        self.send::<members::Create>(&[("groupId", &group_id)], input)
            .await
    }

    pub async fn delete_member(&self, member_id: i64) -> Result<(), ClientError> {
        self.send::<members::Delete>(&[("id", &member_id)], &())
            .await
    }

    // ───────────────────────────── Items ─────────────────────────────

    pub async fn create_item(
        &self,
        trip_id: i64,
        input: &CreateItemInput,
    ) -> Result<Item, ClientError> {
        self.send::<items::Create>(&[("tripId", &trip_id)], input)
            .await
    }

    pub async fn update_item(
        &self,
        item_id: i64,
        input: &UpdateItemInput,
    ) -> Result<Item, ClientError> {
        self.send::<items::Update>(&[("id", &item_id)], input).await
    }

    /// Flip an item's packed flag.
    pub async fn set_packed(&self, item_id: i64, is_packed: bool) -> Result<Item, ClientError> {
        let patch = UpdateItemInput {
            is_packed: Some(is_packed),
            ..Default::default()
        };
        self.update_item(item_id, &patch).await
    }

    pub async fn delete_item(&self, item_id: i64) -> Result<(), ClientError> {
        self.send::<items::Delete>(&[("id", &item_id)], &()).await
    }

    pub async fn bulk_create_items(
        &self,
        trip_id: i64,
        input: &BulkCreateItemsInput,
    ) -> Result<Vec<Item>, ClientError> {
        self.send::<items::BulkCreate>(&[("tripId", &trip_id)], input)
            .await
    }

    /// Copy a saved list into a group's shared items.
    pub async fn import_saved_list(
        &self,
        list: &SavedListWithItems,
        trip_id: i64,
        group_id: i64,
    ) -> Result<Vec<Item>, ClientError> {
        self.bulk_create_items(trip_id, &list.import_into_group(group_id))
            .await
    }

    // ───────────────────────────── Saved lists ───────────────────────

    pub async fn list_saved_lists(&self) -> Result<Vec<SavedListWithItems>, ClientError> {
        self.send::<saved_lists::List>(&[], &()).await
    }

    pub async fn create_saved_list(
        &self,
        input: &CreateSavedListInput,
    ) -> Result<SavedList, ClientError> {
        self.send::<saved_lists::Create>(&[], input).await
    }

    pub async fn delete_saved_list(&self, saved_list_id: i64) -> Result<(), ClientError> {
        self.send::<saved_lists::Delete>(&[("id", &saved_list_id)], &())
            .await
    }
}
