use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub scrape_timeout: Duration,
    pub resume_dir: PathBuf,
    pub job_desc_dir: PathBuf,
    pub report_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            llm_api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            scrape_timeout: Duration::from_secs(parse_env("SCRAPE_TIMEOUT_SECS", 30)?),
            resume_dir: env_or("RESUME_DIR", "data/resumes").into(),
            job_desc_dir: env_or("JOB_DESC_DIR", "data/job_descriptions").into(),
            report_dir: env_or("REPORT_DIR", "data/reports").into(),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config rooted in a scratch directory, for tests.
    pub fn for_tests(root: &std::path::Path) -> Self {
        Config {
            openai_api_key: "test-key".to_string(),
            llm_api_url: DEFAULT_LLM_API_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout: Duration::from_secs(5),
            scrape_timeout: Duration::from_secs(5),
            resume_dir: root.join("resumes"),
            job_desc_dir: root.join("jobs"),
            report_dir: root.join("reports"),
            port: 0,
            rust_log: "info".to_string(),
        }
    }
}
