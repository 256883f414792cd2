//! Output encodings the compressor can produce, and file naming for them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Baseline lossy format; every platform can produce it.
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::Webp];

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    /// Whether the quality factor has any effect on the encoded size.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }

    /// Parse a MIME type such as `image/jpeg`. Parameters after `;` are ignored.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(OutputFormat::Jpeg),
            "image/png" => Some(OutputFormat::Png),
            "image/webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    /// Parse a short name or extension: `jpeg`, `jpg`, `png`, `webp`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::Webp),
            _ => None,
        }
    }

    /// Accept either a MIME type or a short name.
    pub fn parse(value: &str) -> Option<Self> {
        if value.contains('/') {
            Self::from_mime_type(value)
        } else {
            Self::from_name(value)
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Whether an uploaded file's declared type is an image at all.
pub fn is_image_mime_type(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

/// Replace the extension of `name` with the one for `format`.
///
/// Only the last extension is replaced, and only if it sits in the final
/// path segment; names without one get the extension appended.
///
/// `holiday.final.PNG` becomes `holiday.final.jpg`, `scan` becomes `scan.jpg`.
pub fn output_file_name(name: &str, format: OutputFormat) -> String {
    let file_start = name.rfind('/').map_or(0, |i| i + 1);
    let stem = match name[file_start..].rfind('.') {
        // A leading dot (".hidden") or trailing dot carries no extension.
        Some(dot) if dot > 0 && file_start + dot + 1 < name.len() => &name[..file_start + dot],
        _ => name,
    };
    format!("{}.{}", stem, format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_round_trip() {
        for format in OutputFormat::ALL {
            assert_eq!(OutputFormat::from_mime_type(format.mime_type()), Some(format));
        }
    }

    #[test]
    fn test_from_mime_type_variants() {
        assert_eq!(OutputFormat::from_mime_type("IMAGE/JPEG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_mime_type("image/jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(
            OutputFormat::from_mime_type("image/webp; codecs=vp8"),
            Some(OutputFormat::Webp)
        );
        assert_eq!(OutputFormat::from_mime_type("image/avif"), None);
        assert_eq!(OutputFormat::from_mime_type("application/pdf"), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(OutputFormat::from_name("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name(".png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_name("webp"), Some(OutputFormat::Webp));
        assert_eq!(OutputFormat::from_name("tiff"), None);
    }

    #[test]
    fn test_parse_accepts_both_forms() {
        assert_eq!(OutputFormat::parse("image/png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::parse("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::parse(""), None);
    }

    #[test]
    fn test_only_jpeg_is_lossy() {
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(!OutputFormat::Png.is_lossy());
        assert!(!OutputFormat::Webp.is_lossy());
    }

    #[test]
    fn test_is_image_mime_type() {
        assert!(is_image_mime_type("image/heic"));
        assert!(is_image_mime_type(" Image/PNG"));
        assert!(!is_image_mime_type("application/pdf"));
        assert!(!is_image_mime_type(""));
    }

    #[test]
    fn test_output_file_name_replaces_extension() {
        assert_eq!(output_file_name("photo.png", OutputFormat::Jpeg), "photo.jpg");
        assert_eq!(
            output_file_name("holiday.final.PNG", OutputFormat::Jpeg),
            "holiday.final.jpg"
        );
        assert_eq!(output_file_name("scan.jpeg", OutputFormat::Webp), "scan.webp");
    }

    #[test]
    fn test_output_file_name_appends_when_missing() {
        assert_eq!(output_file_name("scan", OutputFormat::Jpeg), "scan.jpg");
        assert_eq!(output_file_name(".hidden", OutputFormat::Png), ".hidden.png");
        assert_eq!(output_file_name("trailing.", OutputFormat::Jpeg), "trailing..jpg");
        assert_eq!(
            output_file_name("my.photos/scan", OutputFormat::Jpeg),
            "my.photos/scan.jpg"
        );
    }

    #[test]
    fn test_display_is_mime() {
        assert_eq!(OutputFormat::Webp.to_string(), "image/webp");
    }
}
