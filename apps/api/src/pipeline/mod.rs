// Interview preparation pipeline.
// Scrape → job analysis (LLM) → resume extraction → resume analysis (LLM) →
// HTML report → artifacts on disk.
//
// Scrape and resume failures abort the run. LLM failures degrade the step to
// its input data plus a `note` and the run carries on.

pub mod analysis;
pub mod handlers;
pub mod prompts;
pub mod runner;
pub mod store;

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::resume::ExtractError;
use crate::scrape::ScrapeError;

pub use runner::Pipeline;
pub use store::OutputPaths;

/// Fatal pipeline failures. Anything here stops the run before any file is written.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Job scraping failed: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Resume reading failed: {0}")]
    Resume(#[from] ExtractError),

    #[error("Job description file not found: {}", .0.display())]
    JobDescriptionNotFound(PathBuf),

    #[error("Job description file {} is not valid JSON: {source}", .path.display())]
    JobDescriptionInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid file name '{0}': expected a bare file name")]
    InvalidFileName(String),

    #[error("Failed to save outputs: {0}")]
    Persist(#[from] std::io::Error),
}

/// Output of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub run_id: Uuid,
    pub job_analysis: Value,
    pub resume_analysis: Value,
    pub html_report: String,
    pub outputs: OutputPaths,
}

/// Output of the standalone job analysis.
#[derive(Debug, Clone, Serialize)]
pub struct JobAnalysisReport {
    pub run_id: Uuid,
    pub job_analysis: Value,
    pub output: PathBuf,
}

/// Output of the standalone resume analysis.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeAnalysisReport {
    pub run_id: Uuid,
    pub resume_analysis: Value,
    pub output: PathBuf,
}
