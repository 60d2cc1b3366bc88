use anyhow::Result;
use async_trait::async_trait;
use bson::{oid::ObjectId, Document};

/// Operations the services need from a document database.
///
/// Collections are addressed by name and documents travel as raw BSON; typed
/// (de)serialization happens in each cell's service layer.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts `document` and returns the identifier assigned by the store.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<ObjectId>;

    async fn find_many(&self, collection: &str, query: FindQuery) -> Result<Vec<Document>>;

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> Result<Option<Document>>;

    async fn list_collection_names(&self) -> Result<Vec<String>>;

    fn database_name(&self) -> &str;
}

#[cfg(test)]
impl std::fmt::Debug for dyn DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }

    pub fn to_document(&self) -> Document {
        let mut sort = Document::new();
        sort.insert(self.field.clone(), if self.descending { -1 } else { 1 });
        sort
    }
}

#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: Document,
    pub sort: Option<SortSpec>,
    pub limit: Option<i64>,
}

impl FindQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn sort_desc(mut self, field: &str) -> Self {
        self.sort = Some(SortSpec::descending(field));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_find_query_builder() {
        let query = FindQuery::all().sort_desc("created_at").limit(10);

        assert!(query.filter.is_empty());
        assert_eq!(query.limit, Some(10));
        assert_eq!(query.sort, Some(SortSpec::descending("created_at")));
    }

    #[test]
    fn test_sort_document() {
        assert_eq!(SortSpec::descending("created_at").to_document(), doc! { "created_at": -1 });

        let ascending = SortSpec {
            field: "name".to_string(),
            descending: false,
        };
        assert_eq!(ascending.to_document(), doc! { "name": 1 });
    }
}
