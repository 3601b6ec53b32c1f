//! Caller identity.
//!
//! Authentication happens upstream; the auth layer forwards the authenticated
//! subject in a request header (configurable, `x-auth-subject` by default).
//! Requests without it never reach a handler body.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use packlist_storage::UserId;

use crate::error::ApiError;
use crate::server::PackListServer;

/// The authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caller(pub UserId);

impl FromRequestParts<PackListServer> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &PackListServer,
    ) -> Result<Self, Self::Rejection> {
        let subject = parts
            .headers
            .get(&state.config.auth_header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ApiError::Unauthorized)?;

        Ok(Caller(UserId(subject.to_string())))
    }
}
