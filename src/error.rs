use thiserror::Error;

use crate::tidal::TidalError;

/// Errors surfaced at the crate boundary.
///
/// Collector methods never return these: upstream failures are logged and
/// degraded to empty results or `false` there. The CSV codec, configuration
/// and authentication paths report through this type.
#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("No tracks found in {0}")]
    NoTracks(String),

    #[error("Upstream failure: {0}")]
    Upstream(#[from] TidalError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ExtractorError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExtractorError::NotFound(_))
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ExtractorError::InvalidFormat(_))
    }

    pub fn is_no_tracks(&self) -> bool {
        matches!(self, ExtractorError::NoTracks(_))
    }
}
