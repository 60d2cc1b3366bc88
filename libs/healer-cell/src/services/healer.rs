use std::sync::Arc;

use anyhow::Result;
use bson::oid::ObjectId;
use chrono::Utc;
use tracing::{debug, info, warn};

use shared_database::{DocumentStore, FindQuery};

use crate::models::{CreateHealerRequest, Healer, HealerRecord, HEALER_COLLECTION};

pub struct HealerService {
    store: Arc<dyn DocumentStore>,
}

impl HealerService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stores a new healer and returns its identifier.
    pub async fn create_healer(&self, request: CreateHealerRequest) -> Result<String> {
        debug!("Creating healer profile for: {}", request.name);

        let record = HealerRecord::from_request(request, Utc::now());
        let document = bson::to_document(&record)?;

        let id = self.store.insert_one(HEALER_COLLECTION, document).await?;
        info!("Healer created with ID: {}", id);

        Ok(id.to_hex())
    }

    /// Returns up to `limit` healers in store order. Documents that no longer
    /// decode as a healer are skipped.
    pub async fn list_healers(&self, limit: i64) -> Result<Vec<Healer>> {
        debug!("Listing healers (limit {})", limit);

        let documents = self.store
            .find_many(HEALER_COLLECTION, FindQuery::all().limit(limit))
            .await?;

        Ok(documents
            .into_iter()
            .filter_map(|document| match bson::from_document::<HealerRecord>(document) {
                Ok(record) => Some(Healer::from(record)),
                Err(e) => {
                    warn!("Skipping unreadable healer document: {}", e);
                    None
                }
            })
            .collect())
    }

    /// Existence check that does not require the stored document to decode.
    pub async fn healer_exists(&self, id: ObjectId) -> Result<bool> {
        Ok(self.store.find_by_id(HEALER_COLLECTION, id).await?.is_some())
    }

    pub async fn find_healer(&self, id: ObjectId) -> Result<Option<HealerRecord>> {
        match self.store.find_by_id(HEALER_COLLECTION, id).await? {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }
}
