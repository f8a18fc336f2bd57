use super::config::ColorThresholds;
use super::core::PixelAnalyzer;
use crate::common::PixelBuffer;
use crate::pipeline::domain::{ColorAnalysis, ColorKey};
use indexmap::IndexMap;

const DOMINANT_COLOR_COUNT: usize = 3;

/// Colour distribution and brightness over every sufficiently opaque pixel.
#[derive(Debug, Clone, Default)]
pub struct ColorAnalyzer {
    thresholds: ColorThresholds,
}

impl ColorAnalyzer {
    pub fn new(thresholds: ColorThresholds) -> Self {
        Self { thresholds }
    }
}

impl PixelAnalyzer for ColorAnalyzer {
    type Output = ColorAnalysis;

    fn analyze(&self, buffer: &PixelBuffer) -> ColorAnalysis {
        let t = &self.thresholds;
        // IndexMap keeps first-seen order for the stable sort below.
        let mut color_counts: IndexMap<ColorKey, usize> = IndexMap::new();
        let mut brightness_sum = 0.0f64;
        let mut dark_pixels = 0usize;
        let mut light_pixels = 0usize;

        for [r, g, b, a] in buffer.pixels() {
            if a < t.alpha_cutoff {
                continue;
            }

            let key = ColorKey::quantize(r, g, b, t.quantization_step);
            *color_counts.entry(key).or_insert(0) += 1;

            let brightness = (r as f64 + g as f64 + b as f64) / 3.0;
            brightness_sum += brightness;

            if brightness < t.dark_below {
                dark_pixels += 1;
            } else if brightness > t.light_above {
                light_pixels += 1;
            }
        }

        let mut sorted: Vec<_> = color_counts.into_iter().collect();
        sorted.sort_by_key(|&(_, count)| std::cmp::Reverse(count));

        // Ratios use the full pixel count, including skipped transparent pixels.
        let total = buffer.total_pixels() as f64;

        ColorAnalysis {
            dominant_colors: sorted
                .into_iter()
                .take(DOMINANT_COLOR_COUNT)
                .map(|(key, _)| key)
                .collect(),
            dark_ratio: dark_pixels as f64 / total,
            light_ratio: light_pixels as f64 / total,
            brightness: brightness_sum / total / 255.0,
        }
    }

    fn name(&self) -> &'static str {
        "ColorAnalyzer"
    }
}
