//! Image acquisition error types

use std::path::PathBuf;

/// Errors that can occur while obtaining or decoding the source image.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetching {url} failed with status {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code returned by the server
        status: u16,
    },

    #[error("Network error: {message} (after {attempts} attempts)")]
    Network {
        /// Last transient failure seen
        message: String,
        /// Number of attempts made before giving up
        attempts: u32,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to parse SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            AcquisitionError::Status {
                url: "https://example.com/a.png".to_string(),
                status: 404,
            }
            .to_string(),
            "Fetching https://example.com/a.png failed with status 404"
        );
        assert_eq!(
            AcquisitionError::Network {
                message: "connection refused".to_string(),
                attempts: 3,
            }
            .to_string(),
            "Network error: connection refused (after 3 attempts)"
        );
        assert_eq!(
            AcquisitionError::EmptyImage {
                width: 0,
                height: 12
            }
            .to_string(),
            "Image has no pixels (0x12)"
        );
    }

    #[test]
    fn test_read_error_names_path() {
        let err = AcquisitionError::Read {
            path: PathBuf::from("/tmp/missing.png"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "Failed to read '/tmp/missing.png': not found");
        assert!(std::error::Error::source(&err).is_some());
    }
}
