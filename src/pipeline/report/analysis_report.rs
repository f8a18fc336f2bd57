use crate::common::ImageDimensions;
use crate::pipeline::context::AnalysisMetrics;
use crate::pipeline::domain::{ContentAnalysis, Measurements};
use serde::Serialize;
use uuid::Uuid;

/// Everything produced by one successful pipeline run.
///
/// Only the deterministic parts are serialized; the request id and timings
/// stay out of the JSON so identical input always serializes identically.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    #[serde(skip)]
    pub request_id: Uuid,
    pub dimensions: ImageDimensions,
    pub measurements: Measurements,
    pub content: ContentAnalysis,
    pub text: String,
    pub diagram: String,
    #[serde(skip)]
    pub metrics: AnalysisMetrics,
}

impl AnalysisReport {
    pub fn into_text(self) -> String {
        self.text
    }
}
