use super::format::byte_size;
use crate::common::{format_list, SupportedFormat};
use crate::error::AnalysisError;

/// Fixed-shape text returned in place of a report whenever analysis fails.
pub fn fallback_message(
    error: &AnalysisError,
    supported_formats: &[SupportedFormat],
    max_image_bytes: usize,
) -> String {
    let recommendation = match error {
        AnalysisError::UnsupportedFormat(_) => {
            "Convert the image to one of the supported formats and try again."
        }
        AnalysisError::SizeExceeded { .. } => {
            "Resize or compress the image below the maximum size and try again."
        }
        AnalysisError::DecodeFailure(_) => {
            "Check that the file is a complete, uncorrupted image and try again."
        }
        AnalysisError::AnalysisFailure(_) => "Try again with a different image.",
    };

    format!(
        "## Image Analysis Unavailable\n\n\
         **Status:** Image analysis failed\n\
         **Reason:** {error}\n\
         **Recommendation:** {recommendation}\n\
         **Note:** Image analysis is unavailable; continuing with text-only analysis.\n\
         **Supported Formats:** {}\n\
         **Maximum Size:** {}\n",
        format_list(supported_formats),
        byte_size(max_image_bytes),
    )
}
