//! Trip types.

use chrono::{DateTime, Utc};

use super::{TripId, UserId};

/// Trip record
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub organizer_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a trip
#[derive(Clone, Debug)]
pub struct CreateTripParams {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub organizer_id: UserId,
}
