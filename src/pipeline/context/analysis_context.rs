use super::metrics::AnalysisMetrics;
use super::state::{ClassifiedState, DecodedState, MeasuredState, ProcessingState};
use crate::common::{ImageDimensions, PixelBuffer};
use crate::pipeline::domain::{ContentAnalysis, Measurements};
use crate::pipeline::report::{self, AnalysisReport};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

// AnalysisContext with compile-time stage tracking via the state parameter
pub struct AnalysisContext<S: ProcessingState> {
    request_id: Uuid,
    buffer: Arc<PixelBuffer>,
    metrics: AnalysisMetrics,
    stage_start: Instant,
    state: S,
}

impl<S: ProcessingState> AnalysisContext<S> {
    pub fn buffer(&self) -> &Arc<PixelBuffer> {
        &self.buffer
    }

    pub fn dimensions(&self) -> ImageDimensions {
        self.buffer.dimensions()
    }

    pub fn stage_name(&self) -> &'static str {
        S::state_name()
    }

    fn stage_elapsed(&self) -> Duration {
        self.stage_start.elapsed()
    }
}

impl AnalysisContext<DecodedState> {
    pub fn new(request_id: Uuid, buffer: PixelBuffer, decode_duration: Duration) -> Self {
        let mut metrics = AnalysisMetrics::new();
        metrics.record_decode_duration(decode_duration);
        Self {
            request_id,
            buffer: Arc::new(buffer),
            metrics,
            stage_start: Instant::now(),
            state: DecodedState,
        }
    }

    pub fn into_measured(mut self, measurements: Measurements) -> AnalysisContext<MeasuredState> {
        let elapsed = self.stage_elapsed();
        self.metrics.record_measure_duration(elapsed);
        AnalysisContext {
            request_id: self.request_id,
            buffer: self.buffer,
            metrics: self.metrics,
            stage_start: Instant::now(),
            state: MeasuredState { measurements },
        }
    }
}

impl AnalysisContext<MeasuredState> {
    pub fn measurements(&self) -> &Measurements {
        &self.state.measurements
    }

    pub fn into_classified(mut self, content: ContentAnalysis) -> AnalysisContext<ClassifiedState> {
        let elapsed = self.stage_elapsed();
        self.metrics.record_classify_duration(elapsed);
        AnalysisContext {
            request_id: self.request_id,
            buffer: self.buffer,
            metrics: self.metrics,
            stage_start: Instant::now(),
            state: ClassifiedState {
                measurements: self.state.measurements,
                content,
            },
        }
    }
}

impl AnalysisContext<ClassifiedState> {
    pub fn measurements(&self) -> &Measurements {
        &self.state.measurements
    }

    pub fn content(&self) -> &ContentAnalysis {
        &self.state.content
    }

    /// Formats the text report and diagram; the buffer is released here.
    pub fn into_report(mut self) -> AnalysisReport {
        let dimensions = self.dimensions();
        let rendered = report::render(
            dimensions,
            &self.state.measurements,
            &self.state.content,
        );
        let elapsed = self.stage_elapsed();
        self.metrics.record_report_duration(elapsed);

        AnalysisReport {
            request_id: self.request_id,
            dimensions,
            measurements: self.state.measurements,
            content: self.state.content,
            text: rendered.text,
            diagram: rendered.diagram,
            metrics: self.metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::analysis::AnalyzerSuite;

    #[test]
    fn walks_every_stage_and_records_timings() {
        let buffer = PixelBuffer::from_rgba(8, 8, [255, 255, 255, 255].repeat(64)).unwrap();
        let suite = AnalyzerSuite::default();
        let request_id = Uuid::new_v4();

        let decoded = AnalysisContext::new(request_id, buffer, Duration::from_micros(5));
        assert_eq!(decoded.stage_name(), "Decoded");

        let measurements = suite.measure(decoded.buffer());
        let measured = decoded.into_measured(measurements);
        assert_eq!(measured.stage_name(), "Measured");

        let content = suite.classify(measured.measurements());
        let classified = measured.into_classified(content);
        assert_eq!(classified.stage_name(), "Classified");
        assert!(classified.content().is_light_mode);

        let report = classified.into_report();
        assert_eq!(report.request_id, request_id);
        assert_eq!(report.dimensions, ImageDimensions::new(8, 8));
        assert_eq!(report.metrics.decode_duration(), Some(Duration::from_micros(5)));
        assert!(report.metrics.measure_duration().is_some());
        assert!(report.metrics.classify_duration().is_some());
        assert!(report.metrics.report_duration().is_some());
        assert!(report.text.contains("```mermaid"));
    }
}
