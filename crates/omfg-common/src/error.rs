//! Error types for the OMFG chart pipeline.

use thiserror::Error;

/// Result type alias using OmfgError.
pub type OmfgResult<T> = Result<T, OmfgError>;

/// Primary error type for chart requests.
#[derive(Debug, Error)]
pub enum OmfgError {
    // === Request Validation Errors ===
    #[error("Unknown column name: {0}")]
    UnknownColumn(String),

    #[error("Unknown varno code: {0}")]
    UnknownVarno(String),

    #[error("Invalid vertco type code: {0}")]
    InvalidVertcoType(String),

    #[error("Invalid cycle '{0}', expected YYYYMMDDThhmmZ")]
    InvalidCycleFormat(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),

    // === Data Errors ===
    #[error("Observation file not found: {0}")]
    MissingArtifact(String),

    #[error("Observation array has no field '{0}'")]
    MissingField(String),

    #[error("Failed to read observation data: {0}")]
    DataReadError(String),

    // === Output Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl OmfgError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// True for errors raised while resolving a request, before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OmfgError::UnknownColumn(_)
                | OmfgError::UnknownVarno(_)
                | OmfgError::InvalidVertcoType(_)
                | OmfgError::InvalidCycleFormat(_)
                | OmfgError::MissingParameter(_)
                | OmfgError::InvalidParameter { .. }
                | OmfgError::UnknownChartType(_)
        )
    }
}

impl From<std::io::Error> for OmfgError {
    fn from(err: std::io::Error) -> Self {
        OmfgError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for OmfgError {
    fn from(err: serde_json::Error) -> Self {
        OmfgError::DataReadError(format!("JSON error: {}", err))
    }
}
