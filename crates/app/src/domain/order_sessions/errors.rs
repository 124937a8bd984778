//! Order sessions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::order_sessions::items::InvalidItemError;

/// Order session service error variants.
#[derive(Debug, Error)]
pub enum OrderSessionsServiceError {
    /// No qualifying session exists for the user.
    #[error("order session not found")]
    NotFound,

    /// A second active or parked session would have been created.
    #[error("conflicting order session")]
    AlreadyExists,

    /// Referenced related row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed validation.
    #[error("invalid data")]
    InvalidData,

    /// The submitted item list was rejected.
    #[error("invalid items: {0}")]
    InvalidItems(#[from] InvalidItemError),

    /// Stored items could not be encoded or decoded.
    #[error("item encoding error")]
    Items(#[source] serde_json::Error),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrderSessionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<serde_json::Error> for OrderSessionsServiceError {
    fn from(error: serde_json::Error) -> Self {
        Self::Items(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            OrderSessionsServiceError::from(Error::RowNotFound),
            OrderSessionsServiceError::NotFound
        ));
    }

    #[test]
    fn pool_errors_stay_opaque() {
        assert!(matches!(
            OrderSessionsServiceError::from(Error::PoolTimedOut),
            OrderSessionsServiceError::Sql(_)
        ));
    }
}
