use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared_database::lenient_datetime;

pub const HEALER_COLLECTION: &str = "healer";
pub const DEFAULT_RATING: f64 = 4.9;

fn default_rating() -> Option<f64> {
    Some(DEFAULT_RATING)
}

/// Body of `POST /healers`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateHealerRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 2))]
    pub specialty: String,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    /// Absent means 4.9; an explicit `null` is kept as no rating.
    #[serde(default = "default_rating")]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
}

/// A healer as stored in the `healer` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealerRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub created_at: Option<bson::DateTime>,
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub updated_at: Option<bson::DateTime>,
}

impl HealerRecord {
    pub fn from_request(request: CreateHealerRequest, now: DateTime<Utc>) -> Self {
        let timestamp = bson::DateTime::from_chrono(now);

        Self {
            id: None,
            name: request.name,
            specialty: request.specialty,
            bio: request.bio,
            email: request.email,
            avatar_url: request.avatar_url,
            rating: request.rating,
            created_at: Some(timestamp),
            updated_at: Some(timestamp),
        }
    }

    pub fn id_string(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

/// A healer as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Healer {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub rating: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<HealerRecord> for Healer {
    fn from(record: HealerRecord) -> Self {
        Self {
            id: record.id_string(),
            name: record.name,
            specialty: record.specialty,
            bio: record.bio,
            email: record.email,
            avatar_url: record.avatar_url,
            rating: record.rating,
            created_at: record.created_at.map(|t| t.to_chrono()),
            updated_at: record.updated_at.map(|t| t.to_chrono()),
        }
    }
}

/// Public snapshot of a healer attached to bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealerSummary {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub avatar_url: Option<String>,
}

impl From<HealerRecord> for HealerSummary {
    fn from(record: HealerRecord) -> Self {
        Self {
            id: record.id_string(),
            name: record.name,
            specialty: record.specialty,
            avatar_url: record.avatar_url,
        }
    }
}
