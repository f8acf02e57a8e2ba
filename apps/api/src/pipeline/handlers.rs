//! Axum route handlers for the interview-prep pipeline.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::pipeline::{JobAnalysisReport, Pipeline, Report, ResumeAnalysisReport};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub job_url: String,
    pub resume_file: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub job_desc_file: String,
    pub resume_file: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/reports
///
/// Full run: job analysis, resume analysis and the HTML report.
pub async fn handle_generate_report(
    State(state): State<AppState>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<Report>, AppError> {
    require("job_url", &request.job_url)?;
    require("resume_file", &request.resume_file)?;

    let report = pipeline(&state)
        .run(request.job_url.trim(), request.resume_file.trim())
        .await?;

    Ok(Json(report))
}

/// POST /api/v1/jobs/analyze
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<JobAnalysisReport>, AppError> {
    require("job_url", &request.job_url)?;

    let result = pipeline(&state).analyze_job(request.job_url.trim()).await?;

    Ok(Json(result))
}

/// POST /api/v1/resumes/analyze
///
/// Analyzes a resume against a job description saved by an earlier job analysis.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<ResumeAnalysisReport>, AppError> {
    require("job_desc_file", &request.job_desc_file)?;
    require("resume_file", &request.resume_file)?;

    let result = pipeline(&state)
        .analyze_resume(request.job_desc_file.trim(), request.resume_file.trim())
        .await?;

    Ok(Json(result))
}

fn pipeline(state: &AppState) -> Pipeline {
    Pipeline::from_config(&state.config, state.scraper.clone(), state.llm.clone())
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
