//! Request extractors that report failures in the API's JSON error shape.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use packlist_api::{parse_input, Validate, ValidationError};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A decoded and validated JSON body.
#[derive(Debug)]
pub struct JsonInput<T>(pub T);

impl<S, T> FromRequest<S> for JsonInput<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Body {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        Ok(JsonInput(parse_input(&bytes)?))
    }
}

/// Parse an integer path parameter.
pub fn parse_id(name: &str, raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| {
        ApiError::Validation(ValidationError::field(
            name,
            format!("{name} must be an integer"),
        ))
    })
}
