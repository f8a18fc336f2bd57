pub mod intake;
pub mod orchestrator;
pub mod service;

pub use intake::{ImageIntake, ImageRequest};
pub use orchestrator::AnalysisPipeline;
pub use service::{
    into_analysis_error, AnalysisService, AnalysisServiceBuilder, BoxAnalysisService,
    ImageAnalyzer,
};
