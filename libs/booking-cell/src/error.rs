use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid healer_id: {0}")]
    InvalidReference(String),

    #[error("Healer not found: {0}")]
    ReferenceNotFound(String),

    #[error("{0}")]
    Store(#[from] anyhow::Error),

    #[error("Failed to encode booking: {0}")]
    Encode(#[from] bson::ser::Error),
}

impl From<BookingError> for AppError {
    fn from(error: BookingError) -> Self {
        match error {
            BookingError::InvalidReference(_) => AppError::BadRequest("Invalid healer_id".to_string()),
            BookingError::ReferenceNotFound(_) => AppError::NotFound("Healer not found".to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_app_error_mapping() {
        assert_matches!(
            AppError::from(BookingError::InvalidReference("abc".into())),
            AppError::BadRequest(msg) if msg == "Invalid healer_id"
        );
        assert_matches!(
            AppError::from(BookingError::ReferenceNotFound("65f0c0ffee0000000000beef".into())),
            AppError::NotFound(msg) if msg == "Healer not found"
        );
        assert_matches!(
            AppError::from(BookingError::Store(anyhow::anyhow!("connection refused"))),
            AppError::Internal(msg) if msg == "connection refused"
        );
    }
}
