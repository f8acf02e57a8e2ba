use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

const STANDALONE_JOB_FILE: &str = "output.json";

/// Where a full run put its artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub job_analysis: PathBuf,
    pub resume_analysis: PathBuf,
    pub html_report: PathBuf,
}

/// Writes pipeline artifacts under two directories. Directories are created on
/// first write and existing files are overwritten whole.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    job_dir: PathBuf,
    report_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(job_dir: impl Into<PathBuf>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_dir: job_dir.into(),
            report_dir: report_dir.into(),
        }
    }

    /// Artifact paths of a full run, prefixed with the whole resume file name
    /// so `jane.pdf` and `jane.docx` never share outputs.
    pub fn comprehensive_paths(&self, resume_file: &str) -> OutputPaths {
        OutputPaths {
            job_analysis: self.job_dir.join(format!("{resume_file}_analysis.json")),
            resume_analysis: self
                .report_dir
                .join(format!("{resume_file}_comprehensive_analysis.json")),
            html_report: self
                .report_dir
                .join(format!("{resume_file}_comprehensive_report.html")),
        }
    }

    pub fn job_analysis_path(&self) -> PathBuf {
        self.job_dir.join(STANDALONE_JOB_FILE)
    }

    pub fn resume_analysis_path(&self, resume_file: &str) -> PathBuf {
        self.report_dir.join(format!("{resume_file}_analysis.json"))
    }

    pub fn job_description_path(&self, file_name: &str) -> PathBuf {
        self.job_dir.join(file_name)
    }

    /// Pretty JSON, four-space indent, non-ASCII kept as-is.
    pub async fn write_json(&self, path: &Path, value: &Value) -> std::io::Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
        buf.push(b'\n');
        write_file(path, &buf).await
    }

    pub async fn write_html(&self, path: &Path, html: &str) -> std::io::Result<()> {
        write_file(path, html.as_bytes()).await
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tokio::fs::write(path, contents).await?;
    debug!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}
