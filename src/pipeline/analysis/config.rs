use serde::Deserialize;

/// Every tunable constant used by the analyzers and the classifier.
///
/// The defaults are the observed reference values and are kept as literals.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisThresholds {
    pub color: ColorThresholds,
    pub edge_threshold: f64,
    pub pattern_tolerance: u8,
    pub classifier: ClassifierThresholds,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorThresholds {
    /// Pixels with alpha below this value are ignored entirely.
    pub alpha_cutoff: u8,
    pub quantization_step: u16,
    /// Brightness strictly below this counts as dark.
    pub dark_below: f64,
    /// Brightness strictly above this counts as light.
    pub light_above: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    pub ui_rectangle_ratio: f64,
    pub ui_regularity_ratio: f64,
    pub text_orientation_ratio: f64,
    pub text_edge_density: f64,
    pub document_edge_density: f64,
    pub simple_graphic_edge_density: f64,
    pub error_max_dark_ratio: f64,
    pub error_min_light_ratio: f64,
    pub theme_ratio: f64,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            color: ColorThresholds::default(),
            edge_threshold: 50.0,
            pattern_tolerance: 20,
            classifier: ClassifierThresholds::default(),
        }
    }
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            alpha_cutoff: 128,
            quantization_step: 32,
            dark_below: 85.0,
            light_above: 170.0, // 85..=170 is neither dark nor light
        }
    }
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            ui_rectangle_ratio: 0.01,
            ui_regularity_ratio: 0.1,
            text_orientation_ratio: 1.5,
            text_edge_density: 0.1,
            document_edge_density: 0.2,
            simple_graphic_edge_density: 0.05,
            error_max_dark_ratio: 0.2,
            error_min_light_ratio: 0.6,
            theme_ratio: 0.7,
        }
    }
}

impl AnalysisThresholds {
    /// Validate threshold values
    pub fn validate(&self) -> Result<(), String> {
        if self.color.quantization_step == 0 {
            return Err("Quantization step must be greater than 0".to_string());
        }

        if self.color.dark_below > self.color.light_above {
            return Err("Dark brightness bound must not exceed the light bound".to_string());
        }

        if self.edge_threshold < 0.0 {
            return Err("Edge threshold must not be negative".to_string());
        }

        let c = &self.classifier;
        let ratios = [
            ("UI rectangle ratio", c.ui_rectangle_ratio),
            ("UI regularity ratio", c.ui_regularity_ratio),
            ("Error dark ratio", c.error_max_dark_ratio),
            ("Error light ratio", c.error_min_light_ratio),
            ("Theme ratio", c.theme_ratio),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} must be between 0.0 and 1.0"));
            }
        }

        if c.text_orientation_ratio < 0.0
            || c.text_edge_density < 0.0
            || c.document_edge_density < 0.0
            || c.simple_graphic_edge_density < 0.0
        {
            return Err("Edge density thresholds must not be negative".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(AnalysisThresholds::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_quantization_step() {
        let mut thresholds = AnalysisThresholds::default();
        thresholds.color.quantization_step = 0;
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn rejects_ratio_outside_unit_interval() {
        let mut thresholds = AnalysisThresholds::default();
        thresholds.classifier.theme_ratio = 1.5;
        assert_eq!(
            thresholds.validate(),
            Err("Theme ratio must be between 0.0 and 1.0".to_string())
        );
    }
}
