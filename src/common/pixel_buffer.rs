use crate::error::AnalysisError;
use image::{DynamicImage, RgbaImage};
use serde::Serialize;

/// Width and height of a decoded image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn total_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Immutable RGBA8 pixels in row-major order.
///
/// Always non-empty: zero-sized images are rejected at construction, so
/// `total_pixels()` can be used as a divisor without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    dimensions: ImageDimensions,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub const CHANNELS: usize = 4;

    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AnalysisError> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::DecodeFailure(format!(
                "image has zero dimensions ({width}x{height})"
            )));
        }

        let dimensions = ImageDimensions::new(width, height);
        let expected = dimensions.total_pixels() * Self::CHANNELS;
        if data.len() != expected {
            return Err(AnalysisError::DecodeFailure(format!(
                "pixel buffer holds {} bytes, expected {expected} for {width}x{height} RGBA",
                data.len()
            )));
        }

        Ok(Self { dimensions, data })
    }

    /// Takes ownership of an already decoded image, converting to RGBA8 when needed.
    pub fn from_image(image: DynamicImage) -> Result<Self, AnalysisError> {
        let rgba: RgbaImage = match image {
            DynamicImage::ImageRgba8(rgba) => rgba,
            other => other.to_rgba8(),
        };
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    pub fn total_pixels(&self) -> usize {
        self.dimensions.total_pixels()
    }

    /// Iterates pixels as `[r, g, b, a]` quads in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(Self::CHANNELS)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Direct indexed access. Callers stay within `width()` x `height()`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.dimensions.width as usize + x as usize) * Self::CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Sum of the R, G and B channels, alpha ignored. Three times the brightness.
    #[inline]
    pub fn channel_sum(&self, x: u32, y: u32) -> u16 {
        let [r, g, b, _] = self.pixel(x, y);
        r as u16 + g as u16 + b as u16
    }
}
