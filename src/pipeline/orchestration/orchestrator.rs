use super::intake::{ImageIntake, ImageRequest};
use crate::config::Configuration;
use crate::error::{AnalysisError, AppError};
use crate::pipeline::analysis::AnalyzerSuite;
use crate::pipeline::context::{AnalysisContext, DecodedState, MeasuredState};
use crate::pipeline::report::{fallback_message, AnalysisReport};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span, instrument, warn};
use uuid::Uuid;

/// Validates, decodes, measures, classifies and reports on a single image.
///
/// Every failure is an [`AnalysisError`]; nothing inside a stage is allowed
/// to unwind past this type.
pub struct AnalysisPipeline {
    config: Configuration,
    intake: ImageIntake,
    suite: Arc<AnalyzerSuite>,
}

impl AnalysisPipeline {
    pub fn new(config: Configuration) -> Result<Self, AppError> {
        config.validate().map_err(AppError::InvalidConfig)?;

        Ok(Self {
            intake: ImageIntake::from_config(&config),
            suite: Arc::new(AnalyzerSuite::new(&config.thresholds)),
            config,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Runs the whole pipeline on the calling thread.
    pub fn process(
        &self,
        image_bytes: &[u8],
        declared_format: &str,
        declared_size: usize,
    ) -> Result<AnalysisReport, AnalysisError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("image_analysis", request_id = %request_id, format = declared_format);
        let _guard = span.enter();

        let format = self
            .intake
            .validate(declared_format, declared_size, image_bytes.len())?;

        let decode_start = Instant::now();
        let buffer = guarded("decode", || self.intake.decode(image_bytes, format))??;
        let context = AnalysisContext::new(request_id, buffer, decode_start.elapsed());

        let measurements = guarded("measure", || self.suite.measure(context.buffer()))?;
        self.finish(context.into_measured(measurements))
    }

    /// Report text on success, the fixed-shape fallback text otherwise.
    pub fn process_or_fallback(
        &self,
        image_bytes: &[u8],
        declared_format: &str,
        declared_size: usize,
    ) -> String {
        match self.process(image_bytes, declared_format, declared_size) {
            Ok(report) => report.into_text(),
            Err(err) => self.fallback(&err),
        }
    }

    /// Async variant: decoding and analysis run on the blocking pool, the three
    /// analyzers concurrently when `parallel_analysis` is set.
    #[instrument(
        skip(self, request),
        fields(request_id = %request.id, format = %request.declared_format, size = request.declared_size)
    )]
    pub async fn process_request(
        &self,
        request: ImageRequest,
    ) -> Result<AnalysisReport, AnalysisError> {
        let ImageRequest {
            id,
            bytes,
            declared_format,
            declared_size,
        } = request;

        let format = self
            .intake
            .validate(&declared_format, declared_size, bytes.len())?;

        let decode_start = Instant::now();
        let intake = self.intake.clone();
        let buffer = tokio::task::spawn_blocking(move || intake.decode(&bytes, format)).await??;
        let context = AnalysisContext::new(id, buffer, decode_start.elapsed());

        let measurements = self.measure_async(&context).await?;
        self.finish(context.into_measured(measurements))
    }

    pub fn fallback(&self, err: &AnalysisError) -> String {
        warn!("Image analysis unavailable ({}): {}", err.kind(), err);
        fallback_message(
            err,
            &self.config.supported_formats,
            self.config.max_image_bytes,
        )
    }

    async fn measure_async(
        &self,
        context: &AnalysisContext<DecodedState>,
    ) -> Result<crate::pipeline::domain::Measurements, AnalysisError> {
        let suite = self.suite.clone();
        let buffer = context.buffer().clone();

        if self.config.parallel_analysis {
            Ok(suite.measure_concurrently(buffer).await?)
        } else {
            Ok(tokio::task::spawn_blocking(move || suite.measure(&buffer)).await?)
        }
    }

    fn finish(
        &self,
        measured: AnalysisContext<MeasuredState>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let content = guarded("classify", || self.suite.classify(measured.measurements()))?;
        let classified = measured.into_classified(content);
        info!(
            "Image classified as {} ({}x{})",
            classified.content().content_type,
            classified.dimensions().width,
            classified.dimensions().height
        );

        let report = guarded("report", || classified.into_report())?;
        debug!(
            "Analysis completed in {}us",
            report.metrics.total().as_micros()
        );
        Ok(report)
    }
}

/// Runs a stage, turning a panic into [`AnalysisError::AnalysisFailure`].
fn guarded<T>(stage: &str, f: impl FnOnce() -> T) -> Result<T, AnalysisError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        AnalysisError::AnalysisFailure(format!(
            "{stage} stage panicked: {}",
            panic_message(payload.as_ref())
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
