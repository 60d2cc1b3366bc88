pub mod codec;
pub mod mongo;
pub mod state;
pub mod store;

pub use codec::lenient_datetime;
pub use mongo::MongoStore;
pub use state::{AppState, DATABASE_UNAVAILABLE};
pub use store::{DocumentStore, FindQuery, SortSpec};
