//! Input manager routing files to the matching extractor

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    /// Turn off caching for callers that read each file once
    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(AnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match Self::detect_file_type(path)? {
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Pdf => {
                return Err(AnalyzerError::UnsupportedFormat(format!(
                    "{}: PDF input is not read directly, extract its text to a .txt file first",
                    path.display()
                )));
            }
            FileType::Unknown => {
                return Err(AnalyzerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (expected .txt or .md)",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| AnalyzerError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
