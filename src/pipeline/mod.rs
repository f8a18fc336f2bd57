pub mod analysis;
pub mod context;
pub mod domain;
pub mod orchestration;
pub mod report;

pub use analysis::{AnalysisThresholds, AnalyzerSuite, PixelAnalyzer};
pub use domain::{ContentAnalysis, ContentType, Measurements, Theme};
pub use orchestration::{AnalysisPipeline, AnalysisServiceBuilder, ImageAnalyzer, ImageRequest};
pub use report::AnalysisReport;
