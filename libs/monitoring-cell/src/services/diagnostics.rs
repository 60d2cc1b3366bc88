// =====================================================================================
// DIAGNOSTICS SERVICE
// =====================================================================================

use std::sync::Arc;

use tracing::{instrument, warn};

use shared_database::AppState;

use crate::models::{
    DiagnosticReport, CONNECTED, DATABASE_AVAILABLE, DATABASE_NOT_INITIALIZED, DATABASE_WORKING,
    MAX_ERROR_CHARS, MAX_LISTED_COLLECTIONS,
};

pub struct DiagnosticsService {
    state: Arc<AppState>,
}

impl DiagnosticsService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    #[instrument(skip(self))]
    pub async fn run(&self) -> DiagnosticReport {
        let mut report = DiagnosticReport::default();

        let Ok(store) = self.state.store() else {
            report.database = DATABASE_NOT_INITIALIZED.to_string();
            return report;
        };

        report.database = DATABASE_AVAILABLE.to_string();
        report.database_url = Some(
            if self.state.config.database_url.is_some() { "Set" } else { "Not Set" }.to_string(),
        );
        report.database_name = Some(store.database_name().to_string());
        report.connection_status = CONNECTED.to_string();

        match store.list_collection_names().await {
            Ok(mut collections) => {
                collections.truncate(MAX_LISTED_COLLECTIONS);
                report.collections = collections;
                report.database = DATABASE_WORKING.to_string();
            }
            Err(e) => {
                warn!("Diagnostics could not list collections: {}", e);
                report.database = format!("Connected but Error: {}", truncate(&e.to_string()));
            }
        }

        report
    }
}

fn truncate(message: &str) -> String {
    message.chars().take(MAX_ERROR_CHARS).collect()
}
