//! Request and response types for the Sports API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest representable instant, 0001-01-01T00:00:00Z
pub const MIN_TIMESTAMP_SECONDS: i64 = -62_135_596_800;
/// Latest representable instant, 9999-12-31T23:59:59Z
pub const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

/// Why a datetime could not become a [`Timestamp`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("unrecognised datetime value {0:?}")]
    Unparseable(String),
    #[error("seconds {0} outside 0001-01-01..=9999-12-31")]
    OutOfRange(i64),
    #[error("nanos {0} outside 0..1000000000")]
    InvalidNanos(i64),
    #[error("datetime {0:?} is finer than nanoseconds")]
    TooPrecise(String),
}

/// Portable timestamp: seconds and nanoseconds since the Unix epoch.
///
/// Range and nanos are checked on construction, so every value converts
/// back to a `DateTime<Utc>` without loss. Serialised as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateTime<Utc>", into = "DateTime<Utc>")]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    pub fn new(seconds: i64, nanos: i64) -> Result<Self, TimestampError> {
        if !(MIN_TIMESTAMP_SECONDS..=MAX_TIMESTAMP_SECONDS).contains(&seconds) {
            return Err(TimestampError::OutOfRange(seconds));
        }
        if !(0..1_000_000_000).contains(&nanos) {
            return Err(TimestampError::InvalidNanos(nanos));
        }
        Ok(Self {
            seconds,
            nanos: nanos as i32,
        })
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    pub fn to_datetime(self) -> DateTime<Utc> {
        // Range was validated in `new`; chrono covers a wider span.
        DateTime::from_timestamp(self.seconds, self.nanos as u32).unwrap_or_default()
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = TimestampError;

    fn try_from(dt: DateTime<Utc>) -> Result<Self, Self::Error> {
        // chrono encodes leap seconds as nanos >= 1e9
        Timestamp::new(dt.timestamp(), i64::from(dt.timestamp_subsec_nanos()))
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.to_datetime()
    }
}

/// A sports event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub advertised_start_time: Timestamp,
}

/// Narrowing criteria for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsRequestFilter {
    #[serde(default)]
    pub ids: Vec<i64>,
}

impl ListEventsRequestFilter {
    pub fn by_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

/// List events request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListEventsRequest {
    #[serde(default)]
    pub filter: Option<ListEventsRequestFilter>,
}

/// List events response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEventsResponse {
    pub events: Vec<Event>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
