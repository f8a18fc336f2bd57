use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

// Recoverable failures of a single image analysis. All of them end up as the
// fallback text at the pipeline boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("Image size of {actual} bytes exceeds the maximum of {limit} bytes")]
    SizeExceeded { actual: usize, limit: usize },
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),
    #[error("Image analysis failed: {0}")]
    AnalysisFailure(String),
}

impl AnalysisError {
    /// Short machine-friendly name of the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::UnsupportedFormat(_) => "unsupported_format",
            AnalysisError::SizeExceeded { .. } => "size_exceeded",
            AnalysisError::DecodeFailure(_) => "decode_failure",
            AnalysisError::AnalysisFailure(_) => "analysis_failure",
        }
    }
}

impl From<image::ImageError> for AnalysisError {
    fn from(err: image::ImageError) -> Self {
        AnalysisError::DecodeFailure(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnalysisError::AnalysisFailure(format!("analysis worker did not complete: {err}"))
    }
}
