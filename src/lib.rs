pub mod common;
pub mod config;
pub mod error;
pub mod pipeline;

pub use common::{PixelBuffer, SupportedFormat};
pub use config::Configuration;
pub use error::{AnalysisError, AppError};
pub use pipeline::{
    AnalysisPipeline, AnalysisReport, AnalysisServiceBuilder, ContentType, ImageAnalyzer,
    ImageRequest,
};
