use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use healer_cell::{HealerService, HealerSummary};
use shared_database::{DocumentStore, FindQuery};

use crate::error::BookingError;
use crate::models::{
    Booking, BookingRecord, CreateBookingRequest, BOOKING_COLLECTION, CREATED_AT_FIELD,
};

/// Healer lookups in flight at once while enriching a listing.
const ENRICHMENT_CONCURRENCY: usize = 16;

pub struct BookingService {
    store: Arc<dyn DocumentStore>,
    healer_service: HealerService,
}

impl BookingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            healer_service: HealerService::new(Arc::clone(&store)),
            store,
        }
    }

    /// Creates a booking after checking that its healer exists.
    ///
    /// The check and the insert are separate store calls; nothing is written
    /// when the reference is malformed or unknown.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> Result<String, BookingError> {
        info!("Booking session for {} with healer {}", request.customer_email, request.healer_id);

        let healer_id = parse_healer_id(&request.healer_id)?;

        if !self.healer_service.healer_exists(healer_id).await? {
            return Err(BookingError::ReferenceNotFound(request.healer_id));
        }

        let record = BookingRecord::from_request(request, Utc::now());
        let document = bson::to_document(&record)?;

        let id = self.store.insert_one(BOOKING_COLLECTION, document).await?;
        info!("Booking created with ID: {}", id);

        Ok(id.to_hex())
    }

    /// Lists up to `limit` bookings, newest first, each with its healer
    /// snapshot when the reference still resolves. Documents that no longer
    /// decode as a booking are skipped.
    pub async fn list_bookings(&self, limit: i64) -> Result<Vec<Booking>, BookingError> {
        debug!("Listing bookings (limit {})", limit);

        let query = FindQuery::all().sort_desc(CREATED_AT_FIELD).limit(limit);
        let documents = self.store.find_many(BOOKING_COLLECTION, query).await?;

        let records = documents.into_iter().filter_map(|document| {
            match bson::from_document::<BookingRecord>(document) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("Skipping unreadable booking document: {}", e);
                    None
                }
            }
        });

        Ok(stream::iter(records)
            .map(|record| self.enrich(record))
            .buffered(ENRICHMENT_CONCURRENCY)
            .collect::<Vec<_>>()
            .await)
    }

    async fn enrich(&self, record: BookingRecord) -> Booking {
        let healer = match self.resolve_healer(&record.healer_id).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Booking {} listed without healer details: {}", record.id_string(), e);
                None
            }
        };

        Booking::from_record(record, healer)
    }

    async fn resolve_healer(&self, healer_id: &str) -> Result<HealerSummary, BookingError> {
        let id = parse_healer_id(healer_id)?;

        self.healer_service
            .find_healer(id)
            .await?
            .map(HealerSummary::from)
            .ok_or_else(|| BookingError::ReferenceNotFound(healer_id.to_string()))
    }
}

fn parse_healer_id(raw: &str) -> Result<ObjectId, BookingError> {
    ObjectId::parse_str(raw).map_err(|_| BookingError::InvalidReference(raw.to_string()))
}
