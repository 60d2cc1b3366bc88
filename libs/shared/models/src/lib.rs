pub mod error;
pub mod query;

pub use error::AppError;
pub use query::{ListQuery, DEFAULT_LIST_LIMIT};
