//! Error types for Inkwell
//!
//! Storage and HTTP layers define their own errors; this one covers what
//! the shared configuration types can report.

use thiserror::Error;

/// Common result type for Inkwell operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Inkwell
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = Error::configuration("data_dir must not be empty");
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "configuration error: data_dir must not be empty"
        );
    }
}
