pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{
    CreateHealerRequest, Healer, HealerRecord, HealerSummary, HEALER_COLLECTION,
};
pub use services::HealerService;
