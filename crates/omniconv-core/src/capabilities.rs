//! Startup detection of optional conversion backends.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

use crate::category::Category;
use crate::config::ToolPreferences;

pub const FFMPEG_DOWNLOAD_URL: &str = "https://ffmpeg.org/download.html";

/// An optional backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Pdf,
    Docx,
    Ffmpeg,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Pdf => "PDF",
            Capability::Docx => "DOCX",
            Capability::Ffmpeg => "FFmpeg",
        })
    }
}

/// A backend that is missing, with what to do about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCapability {
    pub capability: Capability,
    pub summary: String,
    pub guidance: String,
}

/// What this process can convert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub pdf: bool,
    pub docx: bool,
    /// Resolved ffmpeg executable, when it answered `-version`.
    pub ffmpeg: Option<PathBuf>,
}

impl Capabilities {
    /// Detect compiled-in document backends and probe for ffmpeg.
    pub fn probe(tools: &ToolPreferences) -> Self {
        let candidate = tools.ffmpeg_program();
        let ffmpeg = if ffmpeg_responds(&candidate) {
            info!(ffmpeg = %candidate.display(), "FFmpeg detected");
            Some(candidate)
        } else {
            warn!(ffmpeg = %candidate.display(), "FFmpeg not found; audio and video conversion disabled");
            None
        };

        Self {
            pdf: cfg!(feature = "pdf"),
            docx: cfg!(feature = "docx"),
            ffmpeg,
        }
    }

    /// Compiled-in document backends plus an already-resolved ffmpeg, without probing.
    pub fn with_ffmpeg(ffmpeg: Option<PathBuf>) -> Self {
        Self {
            pdf: cfg!(feature = "pdf"),
            docx: cfg!(feature = "docx"),
            ffmpeg,
        }
    }

    pub fn category_available(&self, category: Category) -> bool {
        match category {
            Category::Image => true,
            Category::Document => self.pdf || self.docx,
            Category::Audio | Category::Video => self.ffmpeg.is_some(),
        }
    }

    /// Backends the given category lacks, for the locked-category dialog.
    pub fn missing_for(&self, category: Category) -> Vec<MissingCapability> {
        self.missing()
            .into_iter()
            .filter(|missing| match category {
                Category::Image => false,
                Category::Document => {
                    !self.category_available(category)
                        && matches!(missing.capability, Capability::Pdf | Capability::Docx)
                }
                Category::Audio | Category::Video => missing.capability == Capability::Ffmpeg,
            })
            .collect()
    }

    pub fn missing(&self) -> Vec<MissingCapability> {
        let mut missing = Vec::new();
        if !self.pdf {
            missing.push(MissingCapability {
                capability: Capability::Pdf,
                summary: "Documents: PDF support not built in".to_string(),
                guidance: "Rebuild with `cargo build --features pdf`.".to_string(),
            });
        }
        if !self.docx {
            missing.push(MissingCapability {
                capability: Capability::Docx,
                summary: "DOCX: Word support not built in".to_string(),
                guidance: "Rebuild with `cargo build --features docx`.".to_string(),
            });
        }
        if self.ffmpeg.is_none() {
            missing.push(MissingCapability {
                capability: Capability::Ffmpeg,
                summary: "Audio & Video: FFmpeg not found".to_string(),
                guidance: format!(
                    "Install FFmpeg on your system:\n{FFMPEG_DOWNLOAD_URL}\n\nor set `ffmpeg_path` under [tools] in config.toml."
                ),
            });
        }
        missing
    }

    /// Console banner listing missing backends, or `None` when everything is present.
    pub fn banner(&self) -> Option<String> {
        let missing = self.missing();
        if missing.is_empty() {
            return None;
        }

        let rule = "=".repeat(50);
        let mut text = format!("\n{rule}\nOPTIONAL FEATURES UNAVAILABLE:\n{rule}\n");
        for entry in &missing {
            text.push_str(&format!("  • {}\n", entry.summary));
        }
        text.push_str("\nTo enable:\n");
        for entry in &missing {
            for line in entry.guidance.lines().filter(|line| !line.is_empty()) {
                text.push_str(&format!("  {line}\n"));
            }
        }
        text.push_str(&rule);
        text.push('\n');
        Some(text)
    }

    /// Text for the dialog shown when a locked category is clicked.
    pub fn guidance_for(&self, category: Category) -> String {
        let missing = self.missing_for(category);
        if missing.is_empty() {
            return "Module not available".to_string();
        }
        let mut text = String::from("To use this feature:\n\n");
        let parts: Vec<&str> = missing.iter().map(|m| m.guidance.as_str()).collect();
        text.push_str(&parts.join("\n\n"));
        text
    }
}

fn ffmpeg_responds(program: &Path) -> bool {
    match Command::new(program)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => status.success(),
        Err(err) => {
            debug!(error = %err, "FFmpeg probe failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none_available() -> Capabilities {
        Capabilities {
            pdf: false,
            docx: false,
            ffmpeg: None,
        }
    }

    #[test]
    fn images_are_always_available() {
        assert!(none_available().category_available(Category::Image));
        assert!(none_available().missing_for(Category::Image).is_empty());
    }

    #[test]
    fn documents_need_either_backend() {
        let mut caps = none_available();
        assert!(!caps.category_available(Category::Document));
        caps.docx = true;
        assert!(caps.category_available(Category::Document));
        assert!(caps.missing_for(Category::Document).is_empty());
    }

    #[test]
    fn media_categories_need_ffmpeg() {
        let mut caps = none_available();
        assert!(!caps.category_available(Category::Audio));
        assert!(!caps.category_available(Category::Video));
        assert!(caps.guidance_for(Category::Audio).contains(FFMPEG_DOWNLOAD_URL));

        caps.ffmpeg = Some(PathBuf::from("ffmpeg"));
        assert!(caps.category_available(Category::Video));
    }

    #[test]
    fn banner_lists_every_missing_backend() {
        let banner = none_available().banner().unwrap();
        assert!(banner.contains("OPTIONAL FEATURES UNAVAILABLE"));
        assert!(banner.contains("PDF"));
        assert!(banner.contains("DOCX"));
        assert!(banner.contains("FFmpeg"));
    }

    #[test]
    fn no_banner_when_complete() {
        let caps = Capabilities {
            pdf: true,
            docx: true,
            ffmpeg: Some(PathBuf::from("/usr/bin/ffmpeg")),
        };
        assert!(caps.banner().is_none());
    }

    #[test]
    fn missing_program_does_not_respond() {
        assert!(!ffmpeg_responds(Path::new("/definitely/not/a/real/ffmpeg")));
    }
}
