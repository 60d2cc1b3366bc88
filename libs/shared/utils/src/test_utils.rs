use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Bson, Document};
use serde_json::json;
use tokio::sync::RwLock;

use shared_config::AppConfig;
use shared_database::{AppState, DocumentStore, FindQuery};

pub const TEST_DATABASE_NAME: &str = "reiki_test";

pub struct TestConfig {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub port: u16,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            database_url: Some("mongodb://localhost:27017".to_string()),
            database_name: Some(TEST_DATABASE_NAME.to_string()),
            port: 8000,
        }
    }
}

impl TestConfig {
    pub fn unconfigured() -> Self {
        Self {
            database_url: None,
            database_name: None,
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_url: self.database_url.clone(),
            database_name: self.database_name.clone(),
            port: self.port,
        }
    }

    /// State backed by the given store.
    pub fn state_with(&self, store: Arc<dyn DocumentStore>) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config(), Some(store)))
    }

    /// State with no store, as when the database could not be configured.
    pub fn unavailable_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(self.to_app_config(), None))
    }
}

/// Document store kept in process memory.
///
/// Mirrors the subset of MongoDB behavior the services rely on: generated
/// `_id`s, equality filters, single-field sort with missing values ordered
/// lowest, and limits. Individual collections can be broken to simulate
/// store failures.
pub struct InMemoryStore {
    name: String,
    collections: RwLock<HashMap<String, Vec<Document>>>,
    broken: RwLock<HashSet<String>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            name: TEST_DATABASE_NAME.to_string(),
            collections: RwLock::new(HashMap::new()),
            broken: RwLock::new(HashSet::new()),
        }
    }

    /// Makes every later operation on `collection` fail.
    pub async fn break_collection(&self, collection: &str) {
        self.broken.write().await.insert(collection.to_string());
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    async fn check(&self, collection: &str) -> Result<()> {
        if self.broken.read().await.contains(collection) {
            return Err(anyhow!("connection reset while accessing {}", collection));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn insert_one(&self, collection: &str, mut document: Document) -> Result<ObjectId> {
        self.check(collection).await?;

        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn find_many(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>> {
        self.check(collection).await?;

        let collections = self.collections.read().await;
        let mut documents: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches_filter(doc, &query.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = &query.sort {
            documents.sort_by(|a, b| {
                let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
                if sort.descending { ordering.reverse() } else { ordering }
            });
        }

        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            documents.truncate(limit as usize);
        }

        Ok(documents)
    }

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> Result<Option<Document>> {
        let found = self
            .find_many(collection, FindQuery { filter: doc! { "_id": id }, ..FindQuery::all() })
            .await?;
        Ok(found.into_iter().next())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn database_name(&self) -> &str {
        &self.name
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None | Some(Bson::Null), None | Some(Bson::Null)) => Ordering::Equal,
        (None | Some(Bson::Null), _) => Ordering::Less,
        (_, None | Some(Bson::Null)) => Ordering::Greater,
        (Some(Bson::DateTime(a)), Some(Bson::DateTime(b))) => a.cmp(b),
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (Some(a), Some(b)) => match (as_number(a), as_number(b)) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(f64::from(*n)),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(n) => Some(*n),
        _ => None,
    }
}

/// Store whose every operation fails, standing in for an unreachable server.
pub struct FailingStore {
    pub message: String,
}

impl FailingStore {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, _collection: &str, _document: Document) -> Result<ObjectId> {
        Err(anyhow!(self.message.clone()))
    }

    async fn find_many(&self, _collection: &str, _query: FindQuery) -> Result<Vec<Document>> {
        Err(anyhow!(self.message.clone()))
    }

    async fn find_by_id(&self, _collection: &str, _id: ObjectId) -> Result<Option<Document>> {
        Err(anyhow!(self.message.clone()))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Err(anyhow!(self.message.clone()))
    }

    fn database_name(&self) -> &str {
        TEST_DATABASE_NAME
    }
}

pub struct Fixtures;

impl Fixtures {
    pub fn healer_payload(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "specialty": "Usui Reiki",
            "bio": "Practicing energy work for over a decade",
            "email": "healer@example.com",
            "avatar_url": "https://example.com/avatar.png"
        })
    }

    pub fn booking_payload(healer_id: &str) -> serde_json::Value {
        json!({
            "customer_name": "Jamie Rivers",
            "customer_email": "jamie@example.com",
            "healer_id": healer_id,
            "notes": "First session",
            "scheduled_for": "2025-03-01T10:00:00Z"
        })
    }

    pub fn healer_document(name: &str) -> Document {
        doc! {
            "name": name,
            "specialty": "Crystal Reiki",
            "avatar_url": format!("https://example.com/{}.png", name.to_lowercase()),
            "rating": 4.9,
        }
    }

    /// Booking document with an explicit `created_at`, given in milliseconds
    /// since the epoch.
    pub fn booking_document(healer_id: &str, created_at_millis: i64) -> Document {
        doc! {
            "customer_name": format!("Customer {}", created_at_millis),
            "customer_email": "customer@example.com",
            "healer_id": healer_id,
            "created_at": bson::DateTime::from_millis(created_at_millis),
        }
    }
}
