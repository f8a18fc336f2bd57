use super::classifier::ContentClassifier;
use super::color::ColorAnalyzer;
use super::config::AnalysisThresholds;
use super::core::PixelAnalyzer;
use super::edge::EdgeAnalyzer;
use super::pattern::PatternAnalyzer;
use crate::common::PixelBuffer;
use crate::pipeline::domain::{ContentAnalysis, Measurements};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// The three analyzers plus the classifier, configured from one set of thresholds.
#[derive(Debug, Clone)]
pub struct AnalyzerSuite {
    pub color: ColorAnalyzer,
    pub edge: EdgeAnalyzer,
    pub pattern: PatternAnalyzer,
    pub classifier: ContentClassifier,
}

impl AnalyzerSuite {
    pub fn new(thresholds: &AnalysisThresholds) -> Self {
        Self {
            color: ColorAnalyzer::new(thresholds.color.clone()),
            edge: EdgeAnalyzer::new(thresholds.edge_threshold),
            pattern: PatternAnalyzer::new(thresholds.pattern_tolerance),
            classifier: ContentClassifier::new(thresholds),
        }
    }

    /// Runs the analyzers one after another on the calling thread.
    pub fn measure(&self, buffer: &PixelBuffer) -> Measurements {
        Measurements {
            color: timed(&self.color, buffer),
            edge: timed(&self.edge, buffer),
            pattern: timed(&self.pattern, buffer),
        }
    }

    /// Runs the analyzers on the blocking pool, all three at once.
    pub async fn measure_concurrently(
        self: Arc<Self>,
        buffer: Arc<PixelBuffer>,
    ) -> Result<Measurements, tokio::task::JoinError> {
        let color = {
            let (suite, buffer) = (self.clone(), buffer.clone());
            tokio::task::spawn_blocking(move || timed(&suite.color, &buffer))
        };
        let edge = {
            let (suite, buffer) = (self.clone(), buffer.clone());
            tokio::task::spawn_blocking(move || timed(&suite.edge, &buffer))
        };
        let pattern = {
            let (suite, buffer) = (self, buffer);
            tokio::task::spawn_blocking(move || timed(&suite.pattern, &buffer))
        };

        let (color, edge, pattern) = tokio::try_join!(color, edge, pattern)?;
        Ok(Measurements {
            color,
            edge,
            pattern,
        })
    }

    pub fn classify(&self, measurements: &Measurements) -> ContentAnalysis {
        self.classifier.classify(measurements)
    }
}

impl Default for AnalyzerSuite {
    fn default() -> Self {
        Self::new(&AnalysisThresholds::default())
    }
}

fn timed<A: PixelAnalyzer>(analyzer: &A, buffer: &PixelBuffer) -> A::Output {
    let start = Instant::now();
    let output = analyzer.analyze(buffer);
    debug!(
        "{} completed in {}us",
        analyzer.name(),
        start.elapsed().as_micros()
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn noisy_buffer(seed: u64, width: u32, height: u32) -> PixelBuffer {
        let mut rng = StdRng::seed_from_u64(seed);
        let data: Vec<u8> = (0..width * height * 4).map(|_| rng.random()).collect();
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn repeated_runs_are_identical() {
        let suite = AnalyzerSuite::default();
        let buffer = noisy_buffer(42, 64, 48);

        let first = suite.measure(&buffer);
        let second = suite.measure(&buffer);
        assert_eq!(first, second);
        assert_eq!(suite.classify(&first), suite.classify(&second));
    }

    #[test]
    fn all_black_image_matches_expected_measurements() {
        let buffer = PixelBuffer::from_rgba(12, 9, [0, 0, 0, 255].repeat(12 * 9)).unwrap();
        let m = AnalyzerSuite::default().measure(&buffer);

        assert_eq!(m.color.dark_ratio, 1.0);
        assert_eq!(m.color.light_ratio, 0.0);
        assert_eq!(m.color.brightness, 0.0);
        assert_eq!(m.edge.total_edges(), 0);
        assert_eq!(m.edge.rectangular_shapes, 0);
        assert_eq!(m.pattern.regular_patterns, (12 - 3) * (9 - 3));
        assert_eq!(m.pattern.total_pixels, 12 * 9);
    }

    #[test]
    fn noise_measurements_respect_ranges() {
        let m = AnalyzerSuite::default().measure(&noisy_buffer(7, 40, 30));

        assert!((0.0..=1.0).contains(&m.color.dark_ratio));
        assert!((0.0..=1.0).contains(&m.color.light_ratio));
        assert!((0.0..=1.0).contains(&m.color.brightness));
        assert!(m.edge.normalized_edges >= 0.0);
        assert!(m.edge.rectangular_shapes <= m.edge.horizontal_edges.min(m.edge.vertical_edges));
        assert_eq!(m.pattern.total_pixels, 1_200);
    }

    #[test]
    fn fractional_edge_threshold_applies_to_brightness_steps() {
        // brightness 0 vs 50 on every row boundary
        let mut data = Vec::new();
        for _ in 0..3 {
            data.extend_from_slice(&[0, 0, 0, 255, 50, 50, 50, 255]);
        }
        let buffer = PixelBuffer::from_rgba(2, 3, data).unwrap();

        let default = AnalyzerSuite::default().measure(&buffer);
        assert_eq!(default.edge.horizontal_edges, 0);

        let thresholds = AnalysisThresholds {
            edge_threshold: 49.9,
            ..AnalysisThresholds::default()
        };
        let lowered = AnalyzerSuite::new(&thresholds).measure(&buffer);
        assert_eq!(lowered.edge.horizontal_edges, 2);
    }

    #[tokio::test]
    async fn concurrent_measurement_matches_sequential() {
        let suite = Arc::new(AnalyzerSuite::default());
        let buffer = Arc::new(noisy_buffer(3, 50, 50));

        let sequential = suite.measure(&buffer);
        let concurrent = suite
            .clone()
            .measure_concurrently(buffer.clone())
            .await
            .unwrap();
        assert_eq!(sequential, concurrent);
    }
}
