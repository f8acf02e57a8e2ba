use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, info};

use crate::models::document::{DocumentFormat, ExtractedText, RawDocument};
use crate::scrape::cleaner::TextCleaner;
use crate::scrape::html::{extract_content, ContentSelectors};
use crate::scrape::{JobPosting, ScrapeError};

/// Job boards routinely serve bot user agents an empty shell or a 403.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Default fetch timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches a single job page and reduces it to a `JobPosting`. No link following.
#[derive(Clone)]
pub struct JobScraper {
    client: Client,
    selectors: ContentSelectors,
    cleaner: TextCleaner,
}

impl JobScraper {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        Self::with_rules(
            timeout,
            ContentSelectors::job_board_defaults()?,
            TextCleaner::default(),
        )
    }

    pub fn with_rules(
        timeout: Duration,
        selectors: ContentSelectors,
        cleaner: TextCleaner,
    ) -> Result<Self, ScrapeError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            selectors,
            cleaner,
        })
    }

    /// GET `url`. Any non-2xx status is an `Http` error; nothing is retried.
    pub async fn fetch(&self, url: &str) -> Result<RawDocument, ScrapeError> {
        info!("Fetching job posting from {url}");

        let response = self.client.get(url).send().await?.error_for_status()?;

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(content_type) {
                return Err(ScrapeError::Parse(format!(
                    "expected an HTML page, got content type '{content_type}'"
                )));
            }
        }

        let body = response.text().await?;
        debug!("Fetched {} bytes from {url}", body.len());

        Ok(RawDocument::new(url, DocumentFormat::Html, body.into_bytes()))
    }

    /// Reduces a fetched HTML document to a `JobPosting`.
    pub fn parse(&self, document: &RawDocument) -> Result<JobPosting, ScrapeError> {
        if document.format != DocumentFormat::Html {
            return Err(ScrapeError::Parse(format!(
                "cannot scrape a {} document",
                document.format
            )));
        }

        let html = String::from_utf8_lossy(&document.bytes);
        let region = extract_content(&html, &self.selectors)?;
        match &region.selector {
            Some(selector) => debug!("Content region selected by {selector}"),
            None => debug!("No content selector matched; using full page text"),
        }

        let description = self.cleaner.clean(&region.text);
        let extracted = ExtractedText::new(description, document.source.clone());
        info!(
            "Extracted {} characters of job text from {}",
            extracted.char_len, extracted.source
        );

        Ok(JobPosting::from_extracted(
            extracted,
            Some(region.text),
            region.selector,
        ))
    }

    pub async fn fetch_and_clean(&self, url: &str) -> Result<JobPosting, ScrapeError> {
        let document = self.fetch(url).await?;
        self.parse(&document)
    }
}

fn is_textual(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("html") || content_type.contains("xml") || content_type.starts_with("text/")
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{http::header, http::StatusCode, response::Html, routing::get, Router};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn scraper() -> JobScraper {
        JobScraper::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_and_clean_job_page() {
        let router = Router::new().route(
            "/jobs/42",
            get(|| async {
                Html(
                    r#"<html><body>
                    <nav>Home | Jobs</nav>
                    <div class="job-description">
                        <h1>Platform Engineer</h1>
                        <p>Run our Kafka fleet.......   Apply now to join!</p>
                    </div>
                    <footer>© 2024 Acme</footer>
                </body></html>"#,
                )
            }),
        );
        let base = serve(router).await;
        let url = format!("{base}/jobs/42");

        let posting = scraper().fetch_and_clean(&url).await.unwrap();

        assert_eq!(posting.description, "Platform Engineer\n\nRun our Kafka fleet...");
        assert_eq!(posting.source_url, url);
        assert!(posting.raw_text.unwrap().contains("Apply now"));
        assert_eq!(
            posting.matched_selector.as_deref(),
            Some(r#"[class*="job-description"]"#)
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_user_agent() {
        let router = Router::new().route(
            "/ua",
            get(|headers: axum::http::HeaderMap| async move {
                let ua = headers
                    .get(header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Html(format!("<html><body><main>{ua}</main></body></html>"))
            }),
        );
        let base = serve(router).await;

        let posting = scraper().fetch_and_clean(&format!("{base}/ua")).await.unwrap();
        assert!(posting.description.starts_with("Mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_not_found_is_http_error() {
        let router = Router::new().route("/gone", get(|| async { StatusCode::NOT_FOUND }));
        let base = serve(router).await;

        let err = scraper()
            .fetch_and_clean(&format!("{base}/gone"))
            .await
            .unwrap_err();
        match err {
            ScrapeError::Http(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(404)),
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = scraper()
            .fetch_and_clean(&format!("http://{addr}/job"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Http(_)));
    }

    #[tokio::test]
    async fn test_binary_content_type_is_parse_error() {
        let router = Router::new().route(
            "/job.pdf",
            get(|| async { ([(header::CONTENT_TYPE, "application/pdf")], vec![0x25u8, 0x50, 0x44, 0x46]) }),
        );
        let base = serve(router).await;

        let err = scraper()
            .fetch_and_clean(&format!("{base}/job.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_non_html_document() {
        let doc = RawDocument::new("cv.pdf", DocumentFormat::Pdf, b"%PDF-1.7".to_vec());
        assert!(matches!(scraper().parse(&doc), Err(ScrapeError::Parse(_))));
    }

    #[test]
    fn test_parse_keeps_br_separated_lines_after_noise() {
        let html = r#"<html><body><div class="job-description">Save job<br>Senior Rust Engineer<br>5 years of Tokio experience</div></body></html>"#;
        let doc = RawDocument::new(
            "https://jobs.example/7",
            DocumentFormat::Html,
            html.as_bytes().to_vec(),
        );

        let posting = scraper().parse(&doc).unwrap();

        assert_eq!(
            posting.description,
            "Senior Rust Engineer 5 years of Tokio experience"
        );
    }

    #[test]
    fn test_is_textual() {
        assert!(is_textual("text/html; charset=utf-8"));
        assert!(is_textual("application/xhtml+xml"));
        assert!(!is_textual("image/png"));
    }
}
