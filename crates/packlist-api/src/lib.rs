//! packlist-api: the JSON contract shared by the packlist server and its clients.
//!
//! - [`dto`]: response bodies (camelCase, flattened aggregates)
//! - [`input`]: request bodies and the per-field rules applied to them
//! - [`registry`]: method, path and payload types of every operation

mod dates;
pub mod dto;
pub mod input;
pub mod registry;
mod validate;

pub use dates::parse_trip_date;
pub use input::*;
pub use registry::{build_url, endpoint, Endpoint, Method, Operation, ENDPOINTS};
pub use validate::{parse_input, ErrorBody, Validate, ValidationError};
