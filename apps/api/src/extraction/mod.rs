//! Text extraction from uploaded résumé documents.
//!
//! Extraction never fails past this module: any parse error is logged and the
//! caller receives whatever text was recovered, possibly an empty string.
//! Callers must treat an empty result as "could not extract text".

mod docx;
mod pdf;

use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

/// File extensions the extractor understands, lowercase.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx"];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("PDF parser panicked")]
    Panicked,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploaded document: raw bytes plus its lowercase extension.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Bytes,
    pub extension: String,
}

impl Document {
    pub fn new(bytes: impl Into<Bytes>, extension: &str) -> Self {
        Self {
            bytes: bytes.into(),
            extension: extension.trim_start_matches('.').to_ascii_lowercase(),
        }
    }
}

/// Extracts plain text from an in-memory document.
/// Unsupported extensions and parse failures yield an empty string.
pub fn extract_text(document: &Document) -> String {
    let result = match document.extension.as_str() {
        "pdf" => pdf::extract(&document.bytes),
        "docx" => docx::extract(&document.bytes),
        other => {
            debug!("Unsupported document extension '{other}'");
            return String::new();
        }
    };

    match result {
        Ok(text) => {
            debug!(
                extension = %document.extension,
                chars = text.len(),
                "Extracted document text"
            );
            text
        }
        Err(e) => {
            warn!("Error reading {}: {e}", document.extension.to_uppercase());
            String::new()
        }
    }
}

/// Extracts plain text from a file on disk, dispatching on its extension.
/// Uploads never touch the filesystem; kept for offline batch use.
#[allow(dead_code)]
pub fn extract_text_from_path(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return String::new();
    }

    match std::fs::read(path).map_err(ExtractError::from) {
        Ok(bytes) => extract_text(&Document::new(bytes, &extension)),
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            String::new()
        }
    }
}
