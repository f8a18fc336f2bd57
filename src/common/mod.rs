pub mod image_format;
pub mod pixel_buffer;

pub use image_format::{format_list, SupportedFormat};
pub use pixel_buffer::{ImageDimensions, PixelBuffer};
