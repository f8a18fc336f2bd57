use serde::{Deserialize, Serialize};
use std::fmt;

/// Raster formats the pipeline is willing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFormat {
    #[serde(alias = "jpg")]
    Jpeg,
    Png,
    #[serde(alias = "WebP")]
    Webp,
    Gif,
}

impl SupportedFormat {
    pub const ALL: [SupportedFormat; 4] = [
        SupportedFormat::Jpeg,
        SupportedFormat::Png,
        SupportedFormat::Webp,
        SupportedFormat::Gif,
    ];

    /// Parses a declared format, either a MIME type (`image/png`) or a bare
    /// name / file extension (`png`). Matching is case-insensitive.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let normalized = declared.trim().to_ascii_lowercase();
        let name = normalized
            .strip_prefix("image/")
            .unwrap_or(normalized.as_str())
            .trim_start_matches('.');

        match name {
            "jpeg" | "jpg" | "pjpeg" => Some(SupportedFormat::Jpeg),
            "png" => Some(SupportedFormat::Png),
            "webp" => Some(SupportedFormat::Webp),
            "gif" => Some(SupportedFormat::Gif),
            _ => None,
        }
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            SupportedFormat::Jpeg => image::ImageFormat::Jpeg,
            SupportedFormat::Png => image::ImageFormat::Png,
            SupportedFormat::Webp => image::ImageFormat::WebP,
            SupportedFormat::Gif => image::ImageFormat::Gif,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SupportedFormat::Jpeg => "JPEG",
            SupportedFormat::Png => "PNG",
            SupportedFormat::Webp => "WebP",
            SupportedFormat::Gif => "GIF",
        }
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Comma separated list used in user-facing messages, e.g. `JPEG, PNG, WebP, GIF`.
pub fn format_list(formats: &[SupportedFormat]) -> String {
    formats
        .iter()
        .map(|f| f.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mime_types_and_extensions() {
        assert_eq!(
            SupportedFormat::from_declared("image/jpeg"),
            Some(SupportedFormat::Jpeg)
        );
        assert_eq!(
            SupportedFormat::from_declared("IMAGE/JPG"),
            Some(SupportedFormat::Jpeg)
        );
        assert_eq!(
            SupportedFormat::from_declared(".png"),
            Some(SupportedFormat::Png)
        );
        assert_eq!(
            SupportedFormat::from_declared(" WebP "),
            Some(SupportedFormat::Webp)
        );
        assert_eq!(
            SupportedFormat::from_declared("gif"),
            Some(SupportedFormat::Gif)
        );
    }

    #[test]
    fn rejects_unknown_formats() {
        assert_eq!(SupportedFormat::from_declared("image/tiff"), None);
        assert_eq!(SupportedFormat::from_declared("application/pdf"), None);
        assert_eq!(SupportedFormat::from_declared(""), None);
    }

    #[test]
    fn format_list_uses_display_names() {
        assert_eq!(format_list(&SupportedFormat::ALL), "JPEG, PNG, WebP, GIF");
    }
}
