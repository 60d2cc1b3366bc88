use std::sync::Arc;

use tracing::{error, warn};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::mongo::MongoStore;
use crate::store::DocumentStore;

pub const DATABASE_UNAVAILABLE: &str =
    "Database not available. Check DATABASE_URL and DATABASE_NAME environment variables.";

/// Shared state handed to every router.
///
/// `store` is `None` when no database could be configured; the service still
/// starts and only the data endpoints fail.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { config, store }
    }

    /// Builds the state from configuration, degrading to "store unavailable"
    /// instead of failing startup.
    pub async fn from_config(config: AppConfig) -> Self {
        let store = match config.database_url.as_deref() {
            Some(url) => match MongoStore::connect(url, config.database_name.as_deref()).await {
                Ok(store) => Some(Arc::new(store) as Arc<dyn DocumentStore>),
                Err(e) => {
                    error!("Failed to initialize database client: {}", e);
                    None
                }
            },
            None => {
                warn!("No database configured, data endpoints will be unavailable");
                None
            }
        };

        Self::new(config, store)
    }

    pub fn store(&self) -> Result<Arc<dyn DocumentStore>, AppError> {
        self.store
            .clone()
            .ok_or_else(|| AppError::Database(DATABASE_UNAVAILABLE.to_string()))
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }
}
