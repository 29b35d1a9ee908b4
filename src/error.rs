//! Crate-level error type.

use crate::blocks::ConfigurationError;
use crate::config::ConfigError;
use crate::source::AcquisitionError;

/// Anything that can stop a codeblocks run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("Invalid block settings: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize layout: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = Error::from(ConfigurationError::MinExceedsMax { min: 9, max: 3 });
        assert_eq!(
            err.to_string(),
            "Invalid block settings: minimum block width 9 exceeds maximum block width 3"
        );
    }

    #[test]
    fn test_acquisition_error_is_transparent() {
        let err = Error::from(AcquisitionError::EmptyImage {
            width: 0,
            height: 0,
        });
        assert_eq!(err.to_string(), "Image has no pixels (0x0)");
    }
}
