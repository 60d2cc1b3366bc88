use bson::oid::ObjectId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use shared_database::lenient_datetime;

use healer_cell::HealerSummary;

pub const BOOKING_COLLECTION: &str = "booking";
pub const CREATED_AT_FIELD: &str = "created_at";

/// Offset-free layouts accepted for `scheduled_for`, as sent by a
/// `datetime-local` input. Interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
                .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(raw.trim()).map(Some).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid timestamp: {}", raw))
        }),
        None => Ok(None),
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 2, max = 100))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    pub healer_id: String,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

/// A booking as stored in the `booking` collection.
///
/// `healer_id` keeps the hex string the client sent; it is resolved to a
/// healer by explicit lookup, never by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default)]
    pub healer_id: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub scheduled_for: Option<bson::DateTime>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<bson::DateTime>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<bson::DateTime>,
}

impl BookingRecord {
    pub fn from_request(request: CreateBookingRequest, now: DateTime<Utc>) -> Self {
        let timestamp = bson::DateTime::from_chrono(now);

        Self {
            id: None,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            healer_id: request.healer_id,
            notes: request.notes,
            scheduled_for: request.scheduled_for.map(bson::DateTime::from_chrono),
            created_at: Some(timestamp),
            updated_at: Some(timestamp),
        }
    }

    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// A booking as returned by the API, with the healer snapshot when it resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub healer_id: String,
    pub notes: Option<String>,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healer: Option<HealerSummary>,
}

impl Booking {
    pub fn from_record(record: BookingRecord, healer: Option<HealerSummary>) -> Self {
        Self {
            id: record.id_string(),
            customer_name: record.customer_name,
            customer_email: record.customer_email,
            healer_id: record.healer_id,
            notes: record.notes,
            scheduled_for: record.scheduled_for.map(|t| t.to_chrono()),
            created_at: record.created_at.map(|t| t.to_chrono()),
            updated_at: record.updated_at.map(|t| t.to_chrono()),
            healer,
        }
    }
}
