use thiserror::Error;

use crate::config::{
    FilterConfigBuilderError, ScalableFilterConfigBuilderError,
};

pub type BloomResult<T> = std::result::Result<T, BloomError>;

#[derive(Error, Debug)]
pub enum BloomError {
    #[error("Capacity must be greater than 0")]
    ZeroCapacity,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FilterConfigBuilderError> for BloomError {
    fn from(err: FilterConfigBuilderError) -> Self {
        BloomError::InvalidConfig(err.to_string())
    }
}

impl From<ScalableFilterConfigBuilderError> for BloomError {
    fn from(err: ScalableFilterConfigBuilderError) -> Self {
        BloomError::InvalidConfig(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_errors_become_invalid_config() {
        let err = BloomError::from(FilterConfigBuilderError::ValidationError(
            "capacity too large".to_string(),
        ));
        assert!(matches!(err, BloomError::InvalidConfig(_)));
        assert!(err.to_string().contains("capacity too large"));

        let err = BloomError::from(
            ScalableFilterConfigBuilderError::UninitializedField("capacity"),
        );
        assert!(matches!(err, BloomError::InvalidConfig(_)));
        assert!(err.to_string().contains("capacity"));
    }
}
