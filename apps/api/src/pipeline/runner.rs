//! Pipeline Orchestrator — runs the six interview-prep steps in order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::reconcile::ReconciledResponse;
use crate::llm_client::CompletionClient;
use crate::pipeline::analysis::{enrich, Analysis};
use crate::pipeline::prompts::{
    fill_template, JOB_ANALYSIS_PROMPT_TEMPLATE, JOB_ANALYSIS_SYSTEM, RESUME_ANALYSIS_PROMPT_TEMPLATE,
    RESUME_ANALYSIS_SYSTEM,
};
use crate::pipeline::store::ArtifactStore;
use crate::pipeline::{JobAnalysisReport, PipelineError, Report, ResumeAnalysisReport};
use crate::report::render_report;
use crate::resume;
use crate::scrape::{JobPosting, JobScraper};

const JOB_STAGE: &str = "Job analysis";
const RESUME_STAGE: &str = "Resume analysis";

/// One configured pipeline. Holds no per-run state, so a single instance can
/// serve concurrent runs.
#[derive(Clone)]
pub struct Pipeline {
    scraper: JobScraper,
    llm: Arc<dyn CompletionClient>,
    resume_dir: PathBuf,
    store: ArtifactStore,
}

impl Pipeline {
    pub fn new(
        scraper: JobScraper,
        llm: Arc<dyn CompletionClient>,
        resume_dir: impl Into<PathBuf>,
        store: ArtifactStore,
    ) -> Self {
        Self {
            scraper,
            llm,
            resume_dir: resume_dir.into(),
            store,
        }
    }

    pub fn from_config(config: &Config, scraper: JobScraper, llm: Arc<dyn CompletionClient>) -> Self {
        Self::new(
            scraper,
            llm,
            config.resume_dir.clone(),
            ArtifactStore::new(config.job_desc_dir.clone(), config.report_dir.clone()),
        )
    }

    /// Full run: scrape, analyze the job, read the resume, analyze it against
    /// the job, render the report, then persist all three artifacts.
    ///
    /// Scrape and resume failures return before anything is written.
    pub async fn run(&self, job_url: &str, resume_file: &str) -> Result<Report, PipelineError> {
        let run_id = Uuid::new_v4();
        check_file_name(resume_file)?;
        info!(%run_id, "Starting interview prep run for {job_url} with resume {resume_file}");

        info!(%run_id, "Step 1/6: scraping job posting");
        let posting = self.scraper.fetch_and_clean(job_url).await?;

        info!(%run_id, "Step 2/6: analyzing job description");
        let job_analysis = self.analyze_posting(&posting).await;

        info!(%run_id, "Step 3/6: reading resume");
        let resume_text = resume::extract_text(&self.resume_dir.join(resume_file)).await?;

        info!(%run_id, "Step 4/6: analyzing resume against job");
        let resume_analysis = self.analyze_candidate(&job_analysis, &resume_text).await;

        info!(%run_id, "Step 5/6: rendering report");
        let html_report = render_report(&job_analysis, &resume_analysis, Utc::now());

        info!(%run_id, "Step 6/6: saving outputs");
        let outputs = self.store.comprehensive_paths(resume_file);
        self.store.write_json(&outputs.job_analysis, &job_analysis).await?;
        self.store
            .write_json(&outputs.resume_analysis, &resume_analysis)
            .await?;
        self.store.write_html(&outputs.html_report, &html_report).await?;

        info!(%run_id, "Report saved to {}", outputs.html_report.display());

        Ok(Report {
            run_id,
            job_analysis,
            resume_analysis,
            html_report,
            outputs,
        })
    }

    /// Scrape and analyze a job posting on its own; saved as `output.json`
    /// in the job directory.
    pub async fn analyze_job(&self, job_url: &str) -> Result<JobAnalysisReport, PipelineError> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Analyzing job posting {job_url}");

        let posting = self.scraper.fetch_and_clean(job_url).await?;
        let job_analysis = self.analyze_posting(&posting).await;

        let output = self.store.job_analysis_path();
        self.store.write_json(&output, &job_analysis).await?;
        info!(%run_id, "Job analysis saved to {}", output.display());

        Ok(JobAnalysisReport {
            run_id,
            job_analysis,
            output,
        })
    }

    /// Analyze a resume against a job description saved earlier in the job
    /// directory; saved as `{resume_file}_analysis.json` in the report directory.
    pub async fn analyze_resume(
        &self,
        job_desc_file: &str,
        resume_file: &str,
    ) -> Result<ResumeAnalysisReport, PipelineError> {
        let run_id = Uuid::new_v4();
        check_file_name(job_desc_file)?;
        check_file_name(resume_file)?;
        info!(%run_id, "Analyzing resume {resume_file} against {job_desc_file}");

        let job_analysis = self.load_job_description(job_desc_file).await?;
        let resume_text = resume::extract_text(&self.resume_dir.join(resume_file)).await?;
        let resume_analysis = self.analyze_candidate(&job_analysis, &resume_text).await;

        let output = self.store.resume_analysis_path(resume_file);
        self.store.write_json(&output, &resume_analysis).await?;
        info!(%run_id, "Resume analysis saved to {}", output.display());

        Ok(ResumeAnalysisReport {
            run_id,
            resume_analysis,
            output,
        })
    }

    async fn analyze_posting(&self, posting: &JobPosting) -> Value {
        let prompt = fill_template(
            JOB_ANALYSIS_PROMPT_TEMPLATE,
            &[
                ("job_text", posting.description.as_str()),
                ("json_only", JSON_ONLY_INSTRUCTION),
            ],
        );

        let analysis = enrich(self.llm.as_ref(), JOB_STAGE, JOB_ANALYSIS_SYSTEM, &prompt, || {
            posting_value(posting)
        })
        .await;

        match analysis {
            Analysis::Enriched(ReconciledResponse::Structured(mut map)) => {
                map.insert(
                    "scraped_at".to_string(),
                    Value::String(posting.scraped_at.to_rfc3339()),
                );
                map.insert(
                    "source_url".to_string(),
                    Value::String(posting.source_url.clone()),
                );
                Value::Object(map)
            }
            other => other.into_value(),
        }
    }

    async fn analyze_candidate(&self, job_analysis: &Value, resume_text: &str) -> Value {
        let job_json =
            serde_json::to_string_pretty(job_analysis).unwrap_or_else(|_| job_analysis.to_string());
        let prompt = fill_template(
            RESUME_ANALYSIS_PROMPT_TEMPLATE,
            &[
                ("job_analysis_json", job_json.as_str()),
                ("resume_text", resume_text),
                ("json_only", JSON_ONLY_INSTRUCTION),
            ],
        );

        enrich(
            self.llm.as_ref(),
            RESUME_STAGE,
            RESUME_ANALYSIS_SYSTEM,
            &prompt,
            || json!({ "job_analysis": job_analysis, "resume_text": resume_text }),
        )
        .await
        .into_value()
    }

    async fn load_job_description(&self, file_name: &str) -> Result<Value, PipelineError> {
        let path = self.store.job_description_path(file_name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PipelineError::JobDescriptionNotFound(path));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&bytes)
            .map_err(|source| PipelineError::JobDescriptionInvalid { path, source })
    }
}

fn posting_value(posting: &JobPosting) -> Value {
    serde_json::to_value(posting).unwrap_or_else(|_| {
        json!({
            "description": posting.description,
            "source_url": posting.source_url,
            "scraped_at": posting.scraped_at.to_rfc3339(),
        })
    })
}

/// Caller-supplied names must stay inside their configured directory.
fn check_file_name(name: &str) -> Result<(), PipelineError> {
    match Path::new(name).file_name() {
        Some(file_name) if file_name == name => Ok(()),
        _ => Err(PipelineError::InvalidFileName(name.to_string())),
    }
}
