pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::BookingError;
pub use models::{Booking, BookingRecord, CreateBookingRequest, BOOKING_COLLECTION};
pub use services::BookingService;
