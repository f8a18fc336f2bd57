use crate::common::{format_list, PixelBuffer, SupportedFormat};
use crate::config::Configuration;
use crate::error::AnalysisError;
use tracing::debug;
use uuid::Uuid;

/// Raw image bytes plus what the caller claims about them.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub id: Uuid,
    pub bytes: Vec<u8>,
    pub declared_format: String,
    pub declared_size: usize,
}

impl ImageRequest {
    /// Declared size defaults to the byte length.
    pub fn new(bytes: Vec<u8>, declared_format: impl Into<String>) -> Self {
        let declared_size = bytes.len();
        Self {
            id: Uuid::new_v4(),
            bytes,
            declared_format: declared_format.into(),
            declared_size,
        }
    }

    pub fn with_declared_size(mut self, declared_size: usize) -> Self {
        self.declared_size = declared_size;
        self
    }
}

/// Pre-decode checks and decoding into a [`PixelBuffer`].
#[derive(Debug, Clone)]
pub struct ImageIntake {
    max_image_bytes: usize,
    supported_formats: Vec<SupportedFormat>,
}

impl ImageIntake {
    pub fn new(max_image_bytes: usize, supported_formats: Vec<SupportedFormat>) -> Self {
        Self {
            max_image_bytes,
            supported_formats,
        }
    }

    pub fn from_config(config: &Configuration) -> Self {
        Self::new(config.max_image_bytes, config.supported_formats.clone())
    }

    /// Format and size checks; nothing is decoded here.
    pub fn validate(
        &self,
        declared_format: &str,
        declared_size: usize,
        actual_size: usize,
    ) -> Result<SupportedFormat, AnalysisError> {
        let format = SupportedFormat::from_declared(declared_format)
            .filter(|format| self.supported_formats.contains(format))
            .ok_or_else(|| {
                AnalysisError::UnsupportedFormat(format!(
                    "'{declared_format}' is not one of {}",
                    format_list(&self.supported_formats)
                ))
            })?;

        // an under-declared size must not slip past the limit
        let size = declared_size.max(actual_size);
        if size > self.max_image_bytes {
            return Err(AnalysisError::SizeExceeded {
                actual: size,
                limit: self.max_image_bytes,
            });
        }

        Ok(format)
    }

    pub fn decode(
        &self,
        bytes: &[u8],
        format: SupportedFormat,
    ) -> Result<PixelBuffer, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::DecodeFailure("image data is empty".to_string()));
        }

        let image = image::load_from_memory_with_format(bytes, format.image_format())?;
        let buffer = PixelBuffer::from_image(image)?;
        debug!(
            "Decoded {} image: {}x{}",
            format,
            buffer.width(),
            buffer.height()
        );
        Ok(buffer)
    }
}

impl Default for ImageIntake {
    fn default() -> Self {
        Self::from_config(&Configuration::default())
    }
}
