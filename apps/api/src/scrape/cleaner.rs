//! Text normalization for scraped job descriptions.
//!
//! Cleaning is an ordered list of `(pattern, replacement)` rules applied left
//! to right on the text with its line breaks intact (only runs of spaces and
//! tabs are collapsed first), followed by full whitespace normalization. The rule list is plain data so it can be
//! swapped or tested without a scraper.
//!
//! Noise stripping is lossy on purpose: a rule removes its phrase plus the
//! rest of the sentence it sits in (up to `.`, `!`, `?`, `|` or a line break).
//! A posting that says "Subscribe to our engineering blog for details" mid-text
//! loses that whole sentence.

use once_cell::sync::Lazy;
use regex::Regex;

/// Phrases that mark job-board chrome rather than job content.
pub const NOISE_PHRASES: &[&str] = &[
    "Apply now",
    "Click here",
    "Powered by",
    "©",
    "All rights reserved",
    "Privacy policy",
    "Terms of service",
    "Cookie policy",
    "Subscribe",
    "Follow us",
    "Share this",
    "Report this job",
    "Save job",
    "Email job",
];

static RE_PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_INLINE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\S\n]+").unwrap());

static DEFAULT_RULES: Lazy<Vec<TextRule>> = Lazy::new(|| {
    let mut rules: Vec<TextRule> = NOISE_PHRASES
        .iter()
        .map(|phrase| TextRule::strip_phrase(phrase).unwrap())
        .collect();
    rules.push(TextRule::new(r"\.{3,}", "...").unwrap());
    rules.push(TextRule::new(r"-{3,}", "---").unwrap());
    rules
});

/// One substitution applied to the whole text.
#[derive(Debug, Clone)]
pub struct TextRule {
    pattern: Regex,
    replacement: String,
}

impl TextRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    /// Case-insensitive removal of `phrase` and the remainder of its sentence.
    /// Word-boundary anchored when the phrase starts or ends with a word character,
    /// so "Subscribe" does not eat "Subscriber".
    pub fn strip_phrase(phrase: &str) -> Result<Self, regex::Error> {
        let starts_word = phrase.chars().next().is_some_and(char::is_alphanumeric);
        let ends_word = phrase.chars().last().is_some_and(char::is_alphanumeric);
        let pattern = format!(
            r"(?i){}{}{}[^\n.!?|]*[.!?|]?",
            if starts_word { r"\b" } else { "" },
            regex::escape(phrase),
            if ends_word { r"\b" } else { "" },
        );
        Self::new(&pattern, "")
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }
}

/// Ordered rule set plus whitespace normalization.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    rules: Vec<TextRule>,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_RULES.clone())
    }
}

impl TextCleaner {
    pub fn new(rules: Vec<TextRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[TextRule] {
        &self.rules
    }

    /// Rules see the original line breaks, so a noise rule never reaches past
    /// the line it starts on. Normalization runs once, afterwards.
    pub fn clean(&self, text: &str) -> String {
        let stripped = self
            .rules
            .iter()
            .fold(collapse_inline_whitespace(text), |acc, rule| rule.apply(&acc));
        normalize_whitespace(&stripped)
    }
}

fn collapse_inline_whitespace(text: &str) -> String {
    RE_INLINE_WHITESPACE.replace_all(text, " ").into_owned()
}

/// Collapses every whitespace run to one space, keeping paragraph breaks
/// (a blank line in the input) as exactly one blank line.
pub fn normalize_whitespace(text: &str) -> String {
    RE_PARAGRAPH_BREAK
        .split(text)
        .map(|paragraph| RE_WHITESPACE.replace_all(paragraph, " ").trim().to_string())
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace_collapses_runs() {
        assert_eq!(
            normalize_whitespace("  Senior\t Rust \n Engineer  "),
            "Senior Rust Engineer"
        );
    }

    #[test]
    fn test_normalize_whitespace_keeps_one_blank_line() {
        let input = "About the role\n\n\n\n  We build\n  compilers.\n \t\nRequirements";
        assert_eq!(
            normalize_whitespace(input),
            "About the role\n\nWe build compilers.\n\nRequirements"
        );
    }

    #[test]
    fn test_strip_phrase_is_case_insensitive_and_bounded_to_sentence() {
        let rule = TextRule::strip_phrase("Apply now").unwrap();
        let text = "You will own the ingest path. APPLY NOW and join the team! Benefits: equity.";
        assert_eq!(
            rule.apply(text),
            "You will own the ingest path.  Benefits: equity."
        );
    }

    #[test]
    fn test_strip_phrase_stops_at_line_break() {
        let rule = TextRule::strip_phrase("Share this").unwrap();
        assert_eq!(
            rule.apply("Share this on LinkedIn\nWe are hiring"),
            "\nWe are hiring"
        );
    }

    #[test]
    fn test_strip_phrase_respects_word_boundaries() {
        let rule = TextRule::strip_phrase("Subscribe").unwrap();
        let text = "Experience with subscriber billing systems.";
        assert_eq!(rule.apply(text), text);
    }

    #[test]
    fn test_copyright_symbol_rule_strips_notice() {
        let rule = TextRule::strip_phrase("©").unwrap();
        assert_eq!(rule.apply("Great perks © 2024 Acme Inc. Remote OK"), "Great perks  Remote OK");
    }

    #[test]
    fn test_default_rules_collapse_punctuation() {
        let cleaner = TextCleaner::default();
        assert_eq!(
            cleaner.clean("Wait for it...... then ------ done"),
            "Wait for it... then --- done"
        );
    }

    #[test]
    fn test_default_rules_strip_job_board_chrome() {
        let cleaner = TextCleaner::default();
        let text = "We need a platform engineer.\n\nSave job | Email job | Report this job\n\nPowered by Greenhouse";
        assert_eq!(cleaner.clean(text), "We need a platform engineer.");
    }

    #[test]
    fn test_clean_keeps_lines_after_noise_line() {
        let cleaner = TextCleaner::default();
        assert_eq!(cleaner.clean("Apply\t  now today\nShip it"), "Ship it");
        assert_eq!(
            cleaner.clean("Share this\nSenior Rust Engineer\nRemote, full time"),
            "Senior Rust Engineer Remote, full time"
        );
        assert_eq!(
            cleaner.clean("Follow us on LinkedIn\r\n  Build ingest pipelines  \n\nBenefits"),
            "Build ingest pipelines\n\nBenefits"
        );
    }

    #[test]
    fn test_custom_rule_set_runs_in_order() {
        let cleaner = TextCleaner::new(vec![
            TextRule::new("foo", "bar").unwrap(),
            TextRule::new("bar", "baz").unwrap(),
        ]);
        assert_eq!(cleaner.clean("foo"), "baz");
        assert_eq!(cleaner.rules().len(), 2);
    }

    #[test]
    fn test_clean_is_idempotent_on_clean_text() {
        let cleaner = TextCleaner::default();
        let clean = "Senior Rust Engineer\n\nYou will design storage engines. Requirements: 5 years of Rust...";
        assert_eq!(cleaner.clean(clean), clean);

        let messy = "  Staff Engineer \n\n\n Build things..... fast ----- \n Apply now!  ";
        let once = cleaner.clean(messy);
        assert_eq!(cleaner.clean(&once), once);
    }
}
