use super::config::{AnalysisThresholds, ClassifierThresholds};
use crate::pipeline::domain::{
    ColorKey, ContentAnalysis, ContentType, InterfaceVariant, Measurements,
};

/// Combines the three measurements into content flags and a single label.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    thresholds: ClassifierThresholds,
    error_colors: [ColorKey; 2],
}

impl ContentClassifier {
    pub fn new(thresholds: &AnalysisThresholds) -> Self {
        let step = thresholds.color.quantization_step;
        Self {
            thresholds: thresholds.classifier.clone(),
            // pure red and light pink, bucketed like any other pixel
            error_colors: [
                ColorKey::quantize(255, 0, 0, step),
                ColorKey::quantize(255, 192, 203, step),
            ],
        }
    }

    pub fn classify(&self, measurements: &Measurements) -> ContentAnalysis {
        let t = &self.thresholds;
        let Measurements {
            color,
            edge,
            pattern,
        } = measurements;
        let total = pattern.total_pixels as f64;

        let is_ui_screen = edge.rectangular_shapes as f64 > total * t.ui_rectangle_ratio
            && pattern.regular_patterns as f64 > total * t.ui_regularity_ratio;

        let has_text = edge.horizontal_edges as f64
            > edge.vertical_edges as f64 * t.text_orientation_ratio
            && edge.normalized_edges > t.text_edge_density;

        let is_error_screen = color.dark_ratio < t.error_max_dark_ratio
            && color.light_ratio > t.error_min_light_ratio
            && self.error_colors.iter().any(|key| color.has_dominant(key));

        let is_dark_mode = color.dark_ratio > t.theme_ratio;
        let is_light_mode = color.light_ratio > t.theme_ratio;

        let content_type = if is_ui_screen {
            let variant = if is_error_screen {
                Some(InterfaceVariant::ErrorScreen)
            } else if is_dark_mode {
                Some(InterfaceVariant::DarkTheme)
            } else if is_light_mode {
                Some(InterfaceVariant::LightTheme)
            } else {
                None
            };
            ContentType::UserInterface(variant)
        } else if has_text && edge.normalized_edges > t.document_edge_density {
            ContentType::DocumentOrText
        } else if edge.normalized_edges < t.simple_graphic_edge_density {
            ContentType::SimpleGraphic
        } else {
            ContentType::ComplexImage
        };

        ContentAnalysis {
            is_ui_screen,
            has_text,
            is_error_screen,
            is_dark_mode,
            is_light_mode,
            content_type,
        }
    }
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(&AnalysisThresholds::default())
    }
}
