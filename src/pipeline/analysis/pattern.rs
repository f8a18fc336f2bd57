use super::core::PixelAnalyzer;
use crate::common::PixelBuffer;
use crate::pipeline::domain::PatternAnalysis;

/// Distance from the current pixel to the top-left corner of its comparison window.
const NEIGHBORHOOD_OFFSET: u32 = 3;
const NEIGHBORHOOD_SIZE: u32 = 3;

/// Counts pixels whose colour matches a nearby 3x3 window within a per-channel tolerance.
///
/// The window starts three pixels up and to the left of the current pixel
/// (`(x-3, y-3)..=(x-1, y-1)`); it is not centred on it.
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    tolerance: u8,
}

impl PatternAnalyzer {
    pub fn new(tolerance: u8) -> Self {
        Self { tolerance }
    }

    fn is_regular(&self, buffer: &PixelBuffer, x: u32, y: u32) -> bool {
        let [r, g, b, _] = buffer.pixel(x, y);
        let (left, top) = (x - NEIGHBORHOOD_OFFSET, y - NEIGHBORHOOD_OFFSET);

        for ny in top..top + NEIGHBORHOOD_SIZE {
            for nx in left..left + NEIGHBORHOOD_SIZE {
                let [nr, ng, nb, _] = buffer.pixel(nx, ny);
                if r.abs_diff(nr) > self.tolerance
                    || g.abs_diff(ng) > self.tolerance
                    || b.abs_diff(nb) > self.tolerance
                {
                    return false;
                }
            }
        }
        true
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new(20)
    }
}

impl PixelAnalyzer for PatternAnalyzer {
    type Output = PatternAnalysis;

    fn analyze(&self, buffer: &PixelBuffer) -> PatternAnalysis {
        let mut regular_patterns = 0usize;

        for y in NEIGHBORHOOD_OFFSET..buffer.height() {
            for x in NEIGHBORHOOD_OFFSET..buffer.width() {
                if self.is_regular(buffer, x, y) {
                    regular_patterns += 1;
                }
            }
        }

        PatternAnalysis {
            regular_patterns,
            total_pixels: buffer.total_pixels(),
        }
    }

    fn name(&self) -> &'static str {
        "PatternAnalyzer"
    }
}
