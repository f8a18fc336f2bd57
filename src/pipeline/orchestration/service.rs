use super::intake::ImageRequest;
use super::orchestrator::AnalysisPipeline;
use crate::error::AnalysisError;
use crate::pipeline::report::AnalysisReport;
use futures::Future;
use futures::task::{Context, Poll};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::util::BoxCloneService;
use tower::{BoxError, Service, ServiceBuilder, ServiceExt};

pub type BoxAnalysisService = BoxCloneService<ImageRequest, AnalysisReport, BoxError>;

/// Tower entry point over a shared [`AnalysisPipeline`].
#[derive(Clone)]
pub struct AnalysisService {
    pipeline: Arc<AnalysisPipeline>,
}

impl AnalysisService {
    pub fn new(pipeline: Arc<AnalysisPipeline>) -> Self {
        Self { pipeline }
    }
}

impl Service<ImageRequest> for AnalysisService {
    type Response = AnalysisReport;
    type Error = AnalysisError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ImageRequest) -> Self::Future {
        let pipeline = self.pipeline.clone();
        Box::pin(async move { pipeline.process_request(request).await })
    }
}

/// Recovers the typed error from whatever the middleware stack produced.
pub fn into_analysis_error(err: BoxError) -> AnalysisError {
    if err.is::<Elapsed>() {
        return AnalysisError::AnalysisFailure("analysis timed out".to_string());
    }
    match err.downcast::<AnalysisError>() {
        Ok(err) => *err,
        Err(other) => AnalysisError::AnalysisFailure(other.to_string()),
    }
}

pub struct AnalysisServiceBuilder {
    pipeline: Arc<AnalysisPipeline>,
    timeout: Option<Duration>,
    concurrency_limit: Option<usize>,
}

impl AnalysisServiceBuilder {
    /// Timeout and concurrency limit start from the pipeline's configuration.
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        let timeout = pipeline.config().analysis_timeout();
        let concurrency_limit = Some(pipeline.config().max_concurrent_analyses);
        Self {
            pipeline: Arc::new(pipeline),
            timeout,
            concurrency_limit,
        }
    }

    pub fn analysis_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn concurrency_limit(mut self, limit: usize) -> Self {
        self.concurrency_limit = Some(limit.max(1));
        self
    }

    pub fn build_service(&self) -> BoxAnalysisService {
        let service = ServiceBuilder::new()
            .option_layer(self.timeout.map(TimeoutLayer::new))
            .option_layer(self.concurrency_limit.map(ConcurrencyLimitLayer::new))
            .map_err(|err: AnalysisError| -> BoxError { Box::new(err) })
            .service(AnalysisService::new(self.pipeline.clone()));

        BoxCloneService::new(service)
    }

    pub fn build(self) -> ImageAnalyzer {
        ImageAnalyzer {
            service: self.build_service(),
            pipeline: self.pipeline,
        }
    }
}

/// Cloneable handle that always answers with text, never with an error.
#[derive(Clone)]
pub struct ImageAnalyzer {
    service: BoxAnalysisService,
    pipeline: Arc<AnalysisPipeline>,
}

impl ImageAnalyzer {
    pub async fn analyze(&self, request: ImageRequest) -> Result<AnalysisReport, AnalysisError> {
        self.service
            .clone()
            .oneshot(request)
            .await
            .map_err(into_analysis_error)
    }

    /// Report text, or the fallback text if anything went wrong.
    pub async fn describe(&self, request: ImageRequest) -> String {
        match self.analyze(request).await {
            Ok(report) => report.into_text(),
            Err(err) => self.pipeline.fallback(&err),
        }
    }

    pub fn fallback(&self, err: &AnalysisError) -> String {
        self.pipeline.fallback(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Configuration;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    fn checker_png(size: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(size, size, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([20, 20, 20, 255])
            } else {
                Rgba([230, 230, 230, 255])
            }
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn analyzer(config: Configuration) -> ImageAnalyzer {
        AnalysisServiceBuilder::new(AnalysisPipeline::new(config).unwrap()).build()
    }

    #[tokio::test]
    async fn service_returns_report() {
        let mut service = AnalysisService::new(Arc::new(
            AnalysisPipeline::new(Configuration::default()).unwrap(),
        ));
        let report = service
            .call(ImageRequest::new(checker_png(32), "image/png"))
            .await
            .unwrap();
        assert_eq!(report.measurements.pattern.total_pixels, 32 * 32);
    }

    #[tokio::test]
    async fn layered_service_preserves_typed_errors() {
        let analyzer = analyzer(Configuration::default());
        let err = analyzer
            .analyze(ImageRequest::new(vec![1, 2, 3], "image/x-portable-anymap"))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnsupportedFormat(_)));
    }

    #[tokio::test]
    async fn describe_falls_back_on_oversized_input() {
        let analyzer = analyzer(Configuration::strict(16));
        let text = analyzer
            .describe(ImageRequest::new(checker_png(32), "image/png"))
            .await;

        assert!(text.contains("**Status:** Image analysis failed"));
        assert!(text.contains("exceeds the maximum of 16 bytes"));
        assert!(text.contains("**Maximum Size:** 16 bytes"));
    }

    #[tokio::test]
    async fn concurrent_requests_share_the_service() {
        let analyzer = analyzer(Configuration::default());
        let bytes = checker_png(24);

        let texts = futures::future::join_all((0..6).map(|_| {
            let analyzer = analyzer.clone();
            let request = ImageRequest::new(bytes.clone(), "png");
            async move { analyzer.describe(request).await }
        }))
        .await;

        assert!(texts.iter().all(|text| text == &texts[0]));
        assert!(texts[0].starts_with("## Image Analysis Report"));
    }

    #[tokio::test]
    async fn single_slot_service_without_timeout_serves_every_request() {
        let pipeline = AnalysisPipeline::new(Configuration::default()).unwrap();
        let analyzer = AnalysisServiceBuilder::new(pipeline)
            .without_timeout()
            .concurrency_limit(1)
            .build();
        let bytes = checker_png(16);

        let reports = futures::future::join_all((0..4).map(|_| {
            analyzer.analyze(ImageRequest::new(bytes.clone(), "image/png"))
        }))
        .await;

        assert!(reports.iter().all(|report| report.is_ok()));
    }

    #[tokio::test]
    async fn generous_timeout_lets_analysis_finish() {
        let pipeline = AnalysisPipeline::new(Configuration::sequential()).unwrap();
        let analyzer = AnalysisServiceBuilder::new(pipeline)
            .analysis_timeout(Duration::from_secs(30))
            .build();

        let report = analyzer
            .analyze(ImageRequest::new(checker_png(16), "png"))
            .await
            .unwrap();
        assert_eq!(report.dimensions.width, 16);
    }

    #[tokio::test]
    async fn declared_size_over_limit_is_rejected() {
        let analyzer = analyzer(Configuration::strict(1024 * 1024));
        let request =
            ImageRequest::new(checker_png(8), "image/png").with_declared_size(1024 * 1024 + 1);

        let err = analyzer.analyze(request).await.unwrap_err();
        assert_eq!(
            err,
            AnalysisError::SizeExceeded {
                actual: 1024 * 1024 + 1,
                limit: 1024 * 1024
            }
        );
    }

    #[test]
    fn elapsed_maps_to_analysis_failure() {
        let err = into_analysis_error(Box::new(Elapsed::new()));
        assert_eq!(
            err,
            AnalysisError::AnalysisFailure("analysis timed out".to_string())
        );
    }

    #[test]
    fn foreign_errors_map_to_analysis_failure() {
        let err = into_analysis_error("semaphore closed".into());
        assert_eq!(
            err,
            AnalysisError::AnalysisFailure("semaphore closed".to_string())
        );
    }
}
