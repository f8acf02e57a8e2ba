//! Content-region selection over a parsed job page.

use scraper::{ElementRef, Html, Selector};

use crate::scrape::ScrapeError;

/// Elements that never contribute job text.
const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "aside",
];

/// Elements followed by a paragraph break in the extracted text.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "ul", "ol", "dl", "dt", "dd", "table",
    "tr", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Ordered content-region selectors. The first one that matches anything wins.
pub const JOB_CONTENT_SELECTORS: &[&str] = &[
    r#"[class*="job-description"]"#,
    r#"[class*="job-content"]"#,
    r#"[class*="description"]"#,
    r#"[class*="requirements"]"#,
    r#"[class*="responsibilities"]"#,
    r#"[id*="job-description"]"#,
    r#"[id*="description"]"#,
    "main",
    "article",
    ".content",
];

/// Compiled, ordered selector list.
#[derive(Debug, Clone)]
pub struct ContentSelectors {
    selectors: Vec<(String, Selector)>,
}

impl ContentSelectors {
    pub fn new(patterns: &[&str]) -> Result<Self, ScrapeError> {
        let selectors = patterns
            .iter()
            .map(|pattern| {
                Selector::parse(pattern)
                    .map(|selector| (pattern.to_string(), selector))
                    .map_err(|e| ScrapeError::Parse(format!("invalid selector '{pattern}': {e:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    pub fn job_board_defaults() -> Result<Self, ScrapeError> {
        Self::new(JOB_CONTENT_SELECTORS)
    }
}

/// Text pulled from a page, and which selector produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRegion {
    /// `None` when no selector matched and the whole page body was used.
    pub selector: Option<String>,
    pub text: String,
}

/// Runs the content-region heuristic over `html`.
///
/// Matches inside stripped elements are ignored, and a match nested inside an
/// earlier match of the same selector is not counted twice.
pub fn extract_content(html: &str, selectors: &ContentSelectors) -> Result<ContentRegion, ScrapeError> {
    let document = Html::parse_document(html);

    for (pattern, selector) in &selectors.selectors {
        let matches: Vec<ElementRef> = document
            .select(selector)
            .filter(|element| !is_stripped(element))
            .collect();

        if matches.is_empty() {
            continue;
        }

        let mut text = String::new();
        let mut taken = Vec::new();
        for element in matches {
            if element.ancestors().any(|ancestor| taken.contains(&ancestor.id())) {
                continue;
            }
            taken.push(element.id());
            collect_text(element, &mut text);
            text.push_str("\n\n");
        }

        if text.trim().is_empty() {
            break;
        }

        return Ok(ContentRegion {
            selector: Some(pattern.clone()),
            text,
        });
    }

    Ok(ContentRegion {
        selector: None,
        text: page_text(&document)?,
    })
}

/// Visible text of the whole page body (or the document root if there is no body).
fn page_text(document: &Html) -> Result<String, ScrapeError> {
    let body = Selector::parse("body")
        .map_err(|e| ScrapeError::Parse(format!("invalid selector 'body': {e:?}")))?;
    let root = document
        .select(&body)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    collect_text(root, &mut text);
    Ok(text)
}

fn is_stripped(element: &ElementRef) -> bool {
    STRIPPED_TAGS.contains(&element.value().name())
        || element.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| STRIPPED_TAGS.contains(&e.name()))
        })
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let tag = child_element.value().name();
            if STRIPPED_TAGS.contains(&tag) {
                continue;
            }
            if tag == "br" {
                out.push('\n');
                continue;
            }
            collect_text(child_element, out);
            if BLOCK_TAGS.contains(&tag) {
                out.push_str("\n\n");
            }
        }
    }
}
