use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format tag carried by every fetched or loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Html,
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Html => "html",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque blob retrieved from a URL or read from disk, before any text extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// URL or filename the bytes came from.
    pub source: String,
    pub format: DocumentFormat,
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(source: impl Into<String>, format: DocumentFormat, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            format,
            bytes,
        }
    }
}

/// Normalized text pulled out of a `RawDocument`, with provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub source: String,
    pub extracted_at: DateTime<Utc>,
    /// Length in characters, not bytes.
    pub char_len: usize,
}

impl ExtractedText {
    pub fn new(text: String, source: impl Into<String>) -> Self {
        let char_len = text.chars().count();
        Self {
            text,
            source: source.into(),
            extracted_at: Utc::now(),
            char_len,
        }
    }
}
