use serde::{Deserialize, Serialize};

pub const BACKEND_RUNNING: &str = "Running";
pub const DATABASE_NOT_AVAILABLE: &str = "Not Available";
pub const DATABASE_AVAILABLE: &str = "Available";
pub const DATABASE_NOT_INITIALIZED: &str = "Available but not initialized";
pub const DATABASE_WORKING: &str = "Connected & Working";
pub const CONNECTED: &str = "Connected";
pub const NOT_CONNECTED: &str = "Not Connected";
pub const MAX_LISTED_COLLECTIONS: usize = 10;
pub const MAX_ERROR_CHARS: usize = 80;

/// Body of `GET /test`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticReport {
    fn default() -> Self {
        Self {
            backend: BACKEND_RUNNING.to_string(),
            database: DATABASE_NOT_AVAILABLE.to_string(),
            database_url: None,
            database_name: None,
            connection_status: NOT_CONNECTED.to_string(),
            collections: Vec::new(),
        }
    }
}
