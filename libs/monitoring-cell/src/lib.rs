// =====================================================================================
// MONITORING CELL - SERVICE DIAGNOSTICS
// =====================================================================================
//
// Reports whether the backend is up and whether the document store is
// configured, reachable and holding collections. Never fails: every store
// error is folded into the report body.
//
// =====================================================================================

pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::DiagnosticReport;
pub use router::monitoring_routes;
pub use services::DiagnosticsService;
