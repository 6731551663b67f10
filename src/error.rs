//! Unified error types for the item service.

use thiserror::Error;

use crate::items::{ItemId, ValidationErrors};

/// Top-level error type for service startup.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Host/port pair does not form a socket address.
    #[error("invalid bind address {host}:{port}")]
    InvalidBindAddress {
        /// Configured host.
        host: String,
        /// Configured port.
        port: u16,
    },

    /// Log file appender or subscriber could not be set up.
    #[error("logging error: {0}")]
    Logging(String),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Item store errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItemError {
    /// No item with the requested id exists.
    #[error("Item with id {id} not found")]
    NotFound {
        /// The id that was looked up.
        id: ItemId,
    },

    /// Input fields violate their constraints.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::FieldViolation;

    #[test]
    fn not_found_message_names_the_id() {
        let err = ItemError::NotFound { id: 42 };
        assert_eq!(err.to_string(), "Item with id 42 not found");
    }

    #[test]
    fn validation_message_lists_fields() {
        let err = ItemError::from(ValidationErrors::from(vec![
            FieldViolation::new("name", "must not be empty"),
            FieldViolation::new("price", "must be greater than 0"),
        ]));

        assert_eq!(
            err.to_string(),
            "validation failed: name: must not be empty; price: must be greater than 0"
        );
    }
}
