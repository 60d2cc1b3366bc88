use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId, Document};
use futures::TryStreamExt;
use mongodb::{action::Find, Client, Collection, Database};
use tracing::{debug, info};

use crate::store::{DocumentStore, FindQuery};

pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Parses the connection string and selects the database.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(url: &str, database_name: Option<&str>) -> Result<Self> {
        let client = Client::with_uri_str(url).await?;

        let database = match database_name {
            Some(name) => client.database(name),
            None => client.default_database().ok_or_else(|| {
                anyhow!("DATABASE_NAME not set and DATABASE_URL names no default database")
            })?,
        };

        info!("Using MongoDB database {}", database.name());
        Ok(Self { database })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId> {
        debug!("Inserting document into {}", collection);

        let result = self.database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            anyhow!("Store returned a non-ObjectId identifier: {}", result.inserted_id)
        })
    }

    async fn find_many(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>> {
        debug!("Finding documents in {} (limit {:?})", collection, query.limit);

        let collection = self.database.collection::<Document>(collection);
        let cursor = build_find(&collection, query).await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> Result<Option<Document>> {
        debug!("Looking up {} in {}", id, collection);

        Ok(self.database
            .collection::<Document>(collection)
            .find_one(doc! { "_id": id })
            .await?)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        Ok(self.database.list_collection_names().await?)
    }

    fn database_name(&self) -> &str {
        self.database.name()
    }
}

fn build_find(collection: &Collection<Document>, query: FindQuery) -> Find<'_, Document> {
    let mut find = collection.find(query.filter);

    if let Some(sort) = query.sort {
        find = find.sort(sort.to_document());
    }
    if let Some(limit) = query.limit {
        find = find.limit(limit);
    }

    find
}
