use super::core::PixelAnalyzer;
use crate::common::PixelBuffer;
use crate::pipeline::domain::EdgeAnalysis;

/// Counts brightness steps between each pixel and its left and top neighbours.
///
/// No smoothing is applied, so single-pixel noise registers as edges.
#[derive(Debug, Clone)]
pub struct EdgeAnalyzer {
    threshold: f64,
}

impl EdgeAnalyzer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Brightness difference strictly above the threshold, compared on channel
    /// sums so no rounding happens on either side.
    #[inline]
    fn is_edge(&self, a: u16, b: u16) -> bool {
        a.abs_diff(b) as f64 > 3.0 * self.threshold
    }
}

impl Default for EdgeAnalyzer {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl PixelAnalyzer for EdgeAnalyzer {
    type Output = EdgeAnalysis;

    fn analyze(&self, buffer: &PixelBuffer) -> EdgeAnalysis {
        let (width, height) = (buffer.width(), buffer.height());
        let mut horizontal_edges = 0usize;
        let mut vertical_edges = 0usize;
        let mut rectangular_shapes = 0usize;

        for y in 1..height {
            for x in 1..width {
                let current = buffer.channel_sum(x, y);
                let horizontal = self.is_edge(current, buffer.channel_sum(x - 1, y));
                let vertical = self.is_edge(current, buffer.channel_sum(x, y - 1));

                if horizontal {
                    horizontal_edges += 1;
                }
                if vertical {
                    vertical_edges += 1;
                }
                if horizontal && vertical {
                    rectangular_shapes += 1;
                }
            }
        }

        // Normalised against the full area even though the first row and
        // column are never visited.
        let normalized_edges =
            (horizontal_edges + vertical_edges) as f64 / buffer.total_pixels() as f64;

        EdgeAnalysis {
            horizontal_edges,
            vertical_edges,
            normalized_edges,
            rectangular_shapes,
        }
    }

    fn name(&self) -> &'static str {
        "EdgeAnalyzer"
    }
}
