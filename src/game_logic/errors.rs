use crate::game_logic::docking::ObstacleId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CamkiiError {
    // Config-related errors
    #[error("Failed to get config directory")]
    ConfigDirNotFound,

    #[error("Failed to create config directory: {0}")]
    ConfigDirCreationFailed(#[from] std::io::Error),

    #[error("Failed to serialize config: {0}")]
    SerializationFailed(#[from] toml::ser::Error),

    #[error("Failed to deserialize config: {0}")]
    DeserializationFailed(#[from] toml::de::Error),

    #[error("Config file not found at path: {path}")]
    ConfigFileNotFound { path: PathBuf },

    // Cell layout errors
    #[error("Cell layout file not found at path: {path}")]
    LayoutFileNotFound { path: PathBuf },

    #[error("Corrupted cell layout file: {reason}")]
    CorruptedLayoutFile { reason: String },

    #[error("Cell layout validation failed: {reason}")]
    LayoutValidationFailed { reason: String },

    #[error("Invalid cell layout data: {reason}")]
    InvalidLayoutData { reason: String },

    // Geometry errors
    #[error("Invalid obstacle dimensions: radius={radius}, length={length}")]
    InvalidObstacle { radius: f32, length: f32 },

    #[error("Unknown obstacle: {0}")]
    UnknownObstacle(ObstacleId),
}

/// Result type alias for all operations
pub type CamkiiResult<T> = Result<T, CamkiiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camkii_error_display() {
        let err = CamkiiError::InvalidObstacle {
            radius: -1.0,
            length: 10.0,
        };
        assert!(err.to_string().contains("Invalid obstacle dimensions"));

        let err = CamkiiError::ConfigDirNotFound;
        assert_eq!(err.to_string(), "Failed to get config directory");

        let err = CamkiiError::UnknownObstacle(ObstacleId(7));
        assert_eq!(err.to_string(), "Unknown obstacle: microtubule#7");
    }
}
