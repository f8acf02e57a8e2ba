use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;
use crate::scrape::JobScraper;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is immutable; each request builds its own pipeline from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// LLM used for both analysis stages. Tests swap in a scripted client.
    pub llm: Arc<dyn CompletionClient>,
    pub scraper: JobScraper,
}
