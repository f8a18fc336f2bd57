use serde::Serialize;
use std::time::Duration;

/// Stage timings collected while one image moves through the pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisMetrics {
    decode_duration: Option<Duration>,
    measure_duration: Option<Duration>,
    classify_duration: Option<Duration>,
    report_duration: Option<Duration>,
}

impl AnalysisMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_decode_duration(&mut self, duration: Duration) {
        self.decode_duration = Some(duration);
    }

    pub fn record_measure_duration(&mut self, duration: Duration) {
        self.measure_duration = Some(duration);
    }

    pub fn record_classify_duration(&mut self, duration: Duration) {
        self.classify_duration = Some(duration);
    }

    pub fn record_report_duration(&mut self, duration: Duration) {
        self.report_duration = Some(duration);
    }

    pub fn decode_duration(&self) -> Option<Duration> {
        self.decode_duration
    }

    pub fn measure_duration(&self) -> Option<Duration> {
        self.measure_duration
    }

    pub fn classify_duration(&self) -> Option<Duration> {
        self.classify_duration
    }

    pub fn report_duration(&self) -> Option<Duration> {
        self.report_duration
    }

    pub fn total(&self) -> Duration {
        [
            self.decode_duration,
            self.measure_duration,
            self.classify_duration,
            self.report_duration,
        ]
        .into_iter()
        .flatten()
        .sum()
    }
}
