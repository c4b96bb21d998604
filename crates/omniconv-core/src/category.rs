//! The four conversion domains and their per-category presentation data.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::format::{AudioFormat, DocumentFormat, ImageFormat, VideoFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Document,
    Audio,
    Video,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Image,
        Category::Document,
        Category::Audio,
        Category::Video,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Image => "Images",
            Category::Document => "Documents",
            Category::Audio => "Audio",
            Category::Video => "Video",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Image => "🖼",
            Category::Document => "📄",
            Category::Audio => "🎵",
            Category::Video => "🎬",
        }
    }

    /// Extensions offered by the file-open dialog, without the leading dot.
    pub fn input_extensions(self) -> &'static [&'static str] {
        match self {
            Category::Image => &["jpg", "jpeg", "png", "bmp", "gif", "webp", "tiff", "tif", "ico"],
            Category::Document => &["pdf", "docx", "txt"],
            Category::Audio => &["mp3", "wav", "ogg", "flac", "aac", "m4a", "wma"],
            Category::Video => &["mp4", "avi", "mkv", "mov", "webm", "flv", "wmv", "m4v"],
        }
    }

    /// Target format labels in menu order.
    pub fn target_labels(self) -> Vec<&'static str> {
        match self {
            Category::Image => ImageFormat::ALL.iter().map(|f| f.label()).collect(),
            Category::Document => DocumentFormat::available()
                .iter()
                .map(|f| f.label())
                .collect(),
            Category::Audio => AudioFormat::ALL.iter().map(|f| f.label()).collect(),
            Category::Video => VideoFormat::ALL.iter().map(|f| f.label()).collect(),
        }
    }

    /// One-line "Formats: A • B • C" caption shown under the panel title.
    pub fn formats_caption(self) -> String {
        format!("Formats: {}", self.target_labels().join(" • "))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_caption_lists_seven_formats() {
        assert_eq!(
            Category::Image.formats_caption(),
            "Formats: JPG • PNG • BMP • GIF • WEBP • TIFF • ICO"
        );
    }

    #[test]
    fn document_caption_always_offers_txt() {
        assert!(Category::Document.target_labels().contains(&"TXT"));
    }
}
