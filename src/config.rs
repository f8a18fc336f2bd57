use crate::common::SupportedFormat;
use crate::error::AppError;
use crate::pipeline::analysis::AnalysisThresholds;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const ENV_PREFIX: &str = "IMAGE_INSIGHT";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub max_image_bytes: usize,
    pub supported_formats: Vec<SupportedFormat>,
    pub parallel_analysis: bool,
    pub analysis_timeout_ms: Option<u64>,
    pub max_concurrent_analyses: usize,
    pub thresholds: AnalysisThresholds,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            supported_formats: SupportedFormat::ALL.to_vec(),
            parallel_analysis: true,
            analysis_timeout_ms: Some(30_000),
            max_concurrent_analyses: 4,
            thresholds: AnalysisThresholds::default(),
        }
    }
}

impl Configuration {
    /// Loads defaults, then the optional file, then `IMAGE_INSIGHT_*` environment
    /// variables (nested keys separated by `__`).
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let configuration: Configuration = builder.build()?.try_deserialize()?;
        configuration.validate().map_err(AppError::InvalidConfig)?;
        Ok(configuration)
    }

    /// Analyzers run one after another and no timeout is applied.
    pub fn sequential() -> Self {
        Self {
            parallel_analysis: false,
            analysis_timeout_ms: None,
            max_concurrent_analyses: 1,
            ..Self::default()
        }
    }

    /// Default configuration with a tighter size limit.
    pub fn strict(max_image_bytes: usize) -> Self {
        Self {
            max_image_bytes,
            ..Self::default()
        }
    }

    pub fn analysis_timeout(&self) -> Option<Duration> {
        self.analysis_timeout_ms.map(Duration::from_millis)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_image_bytes == 0 {
            return Err("Maximum image size must be greater than 0".to_string());
        }

        if self.supported_formats.is_empty() {
            return Err("At least one image format must be supported".to_string());
        }

        if self.max_concurrent_analyses == 0 {
            return Err("Concurrent analysis limit must be greater than 0".to_string());
        }

        if self.analysis_timeout_ms == Some(0) {
            return Err("Analysis timeout must be greater than 0".to_string());
        }

        self.thresholds.validate()
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.analysis_timeout_ms = timeout.map(|t| t.as_millis() as u64);
        self
    }

    pub fn with_parallel_analysis(mut self, enabled: bool) -> Self {
        self.parallel_analysis = enabled;
        self
    }
}
