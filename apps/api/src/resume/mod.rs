//! Resume Extractor — reads a PDF or DOCX resume into plain text.
//!
//! No OCR and no layout reconstruction: the text is whatever the format
//! reader exposes, in reading order as the reader sees it. Multi-column
//! resumes and tables may interleave.

mod docx;
mod pdf;

#[cfg(test)]
pub(crate) use docx::tests::write_docx as write_test_docx;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::document::{DocumentFormat, ExtractedText, RawDocument};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Resume file not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported resume format '{0}'. Only PDF or DOCX allowed.")]
    UnsupportedFormat(String),

    #[error("Could not parse {format} resume {path}: {message}")]
    Parse {
        path: PathBuf,
        format: DocumentFormat,
        message: String,
    },

    #[error("Could not read resume: {0}")]
    Io(#[from] std::io::Error),
}

/// Maps a path's extension to a supported resume format, case-insensitively.
pub fn resume_format(path: &Path) -> Result<DocumentFormat, ExtractError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => Ok(DocumentFormat::Pdf),
        "docx" => Ok(DocumentFormat::Docx),
        _ => Err(ExtractError::UnsupportedFormat(if extension.is_empty() {
            "(none)".to_string()
        } else {
            format!(".{extension}")
        })),
    }
}

/// Reads the resume at `path` into a `RawDocument`.
/// Existence is checked before the extension is looked at.
pub async fn load(path: &Path) -> Result<RawDocument, ExtractError> {
    if !tokio::fs::try_exists(path).await? {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    let format = resume_format(path)?;
    let bytes = tokio::fs::read(path).await?;
    Ok(RawDocument::new(path.display().to_string(), format, bytes))
}

/// Extracts plain text from an already-loaded resume document.
/// CPU-bound; call from a blocking context.
pub fn extract_document(document: &RawDocument) -> Result<String, ExtractError> {
    let parse_error = |message: String| ExtractError::Parse {
        path: PathBuf::from(&document.source),
        format: document.format,
        message,
    };

    match document.format {
        DocumentFormat::Pdf => pdf::extract(&document.bytes).map_err(parse_error),
        DocumentFormat::Docx => docx::extract(&document.bytes).map_err(parse_error),
        DocumentFormat::Html => Err(ExtractError::UnsupportedFormat(".html".to_string())),
    }
}

/// Loads and extracts the resume at `path`, with provenance metadata.
pub async fn extract(path: &Path) -> Result<ExtractedText, ExtractError> {
    let document = load(path).await?;
    let format = document.format;

    let (source, text) = tokio::task::spawn_blocking(move || {
        let text = extract_document(&document);
        (document.source, text)
    })
    .await
    .map_err(|e| ExtractError::Parse {
        path: path.to_path_buf(),
        format,
        message: format!("extractor aborted: {e}"),
    })?;

    let extracted = ExtractedText::new(text?, source);
    info!(
        "Extracted {} characters from {} resume {}",
        extracted.char_len, format, extracted.source
    );
    Ok(extracted)
}

/// Extracts the resume at `path` as plain text.
pub async fn extract_text(path: &Path) -> Result<String, ExtractError> {
    extract(path).await.map(|extracted| extracted.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_format_dispatch() {
        assert_eq!(resume_format(Path::new("cv.pdf")).unwrap(), DocumentFormat::Pdf);
        assert_eq!(resume_format(Path::new("CV.DOCX")).unwrap(), DocumentFormat::Docx);
    }

    #[test]
    fn test_resume_format_rejects_other_extensions() {
        for name in ["cv.txt", "cv.xlsx", "cv.doc", "cv"] {
            assert!(
                matches!(resume_format(Path::new(name)), Err(ExtractError::UnsupportedFormat(_))),
                "{name} should be unsupported"
            );
        }
    }

    #[test]
    fn test_unsupported_format_names_extension() {
        let err = resume_format(Path::new("cv.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[tokio::test]
    async fn test_txt_and_xlsx_are_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["resume.txt", "resume.xlsx"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "Jane Doe, Rust engineer").unwrap();
            assert!(matches!(
                extract_text(&path).await,
                Err(ExtractError::UnsupportedFormat(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found_before_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        // An unsupported extension would fail dispatch; NotFound must win.
        for name in ["missing.xlsx", "missing.pdf"] {
            let path = dir.path().join(name);
            match extract_text(&path).await {
                Err(ExtractError::NotFound(p)) => assert_eq!(p, path),
                other => panic!("expected NotFound for {name}, got {other:?}"),
            }
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_path_is_io_error_not_missing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("resume.pdf");
        std::fs::write(&file, b"%PDF-1.7").unwrap();

        // A regular file used as a directory fails the existence check itself.
        let path = file.join("cv.pdf");
        match extract_text(&path).await {
            Err(ExtractError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_docx_resume_extracts_paragraphs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jane.docx");
        docx::tests::write_docx(&path, &["Jane Doe", "Senior Rust Engineer"]);

        let extracted = extract(&path).await.unwrap();
        assert_eq!(extracted.text, "Jane Doe\nSenior Rust Engineer");
        assert_eq!(extracted.char_len, extracted.text.chars().count());
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        assert!(matches!(
            extract_text(&path).await,
            Err(ExtractError::Parse {
                format: DocumentFormat::Pdf,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"PK not really a zip").unwrap();

        assert!(matches!(
            extract_text(&path).await,
            Err(ExtractError::Parse {
                format: DocumentFormat::Docx,
                ..
            })
        ));
    }
}
