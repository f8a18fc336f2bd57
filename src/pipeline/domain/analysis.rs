use serde::Serialize;
use std::fmt;

/// An RGB triple with every channel rounded to the nearest multiple of the
/// quantization step. Channels are `u16` because rounding can reach 256.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorKey {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl ColorKey {
    pub fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// `round(channel / step) * step` per channel, halves rounding up.
    pub fn quantize(r: u8, g: u8, b: u8, step: u16) -> Self {
        Self {
            r: quantize_channel(r, step),
            g: quantize_channel(g, step),
            b: quantize_channel(b, step),
        }
    }
}

fn quantize_channel(channel: u8, step: u16) -> u16 {
    let c = channel as u32;
    let s = step as u32;
    (((2 * c + s) / (2 * s)) * s) as u16
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorAnalysis {
    /// Up to three keys, most frequent first, ties in first-seen order.
    pub dominant_colors: Vec<ColorKey>,
    pub dark_ratio: f64,
    pub light_ratio: f64,
    /// Mean brightness normalised to `[0, 1]`.
    pub brightness: f64,
}

impl ColorAnalysis {
    pub fn has_dominant(&self, key: &ColorKey) -> bool {
        self.dominant_colors.contains(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeAnalysis {
    pub horizontal_edges: usize,
    pub vertical_edges: usize,
    /// Edges per pixel of the full image area.
    pub normalized_edges: f64,
    pub rectangular_shapes: usize,
}

impl EdgeAnalysis {
    pub fn total_edges(&self) -> usize {
        self.horizontal_edges + self.vertical_edges
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternAnalysis {
    pub regular_patterns: usize,
    pub total_pixels: usize,
}

impl PatternAnalysis {
    pub fn regularity(&self) -> f64 {
        if self.total_pixels == 0 {
            return 0.0;
        }
        self.regular_patterns as f64 / self.total_pixels as f64
    }
}

/// The three independent low-level measurements of one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurements {
    pub color: ColorAnalysis,
    pub edge: EdgeAnalysis,
    pub pattern: PatternAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_to_nearest_multiple() {
        assert_eq!(ColorKey::quantize(0, 15, 16, 32), ColorKey::new(0, 0, 32));
        assert_eq!(ColorKey::quantize(47, 48, 100, 32), ColorKey::new(32, 64, 96));
        assert_eq!(ColorKey::quantize(255, 240, 239, 32), ColorKey::new(256, 256, 224));
    }

    #[test]
    fn displays_as_rgb_function() {
        assert_eq!(ColorKey::new(256, 0, 32).to_string(), "rgb(256, 0, 32)");
    }

    #[test]
    fn regularity_is_a_fraction_of_all_pixels() {
        let pattern = PatternAnalysis {
            regular_patterns: 25,
            total_pixels: 100,
        };
        assert_eq!(pattern.regularity(), 0.25);
    }
}
