use crate::common::PixelBuffer;

/// A single read-only pass over a decoded image.
///
/// Analyzers share no state with each other, so any number of them can run
/// over the same buffer concurrently.
pub trait PixelAnalyzer: Send + Sync {
    type Output: Send + 'static;

    fn analyze(&self, buffer: &PixelBuffer) -> Self::Output;
    fn name(&self) -> &'static str;
}
