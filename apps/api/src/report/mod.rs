//! HTML report rendering.
//!
//! The analyses are free-form JSON whose shape is decided by the model, so the
//! renderer walks the values generically: objects become headed sections,
//! arrays become lists, scalars become text. Everything is escaped.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use serde_json::Value;

const MAX_HEADING_LEVEL: usize = 6;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;\
    padding:0 1rem;line-height:1.5;color:#222}h1{border-bottom:2px solid #333}\
    h2{margin-top:2.5rem;border-bottom:1px solid #ccc}section{margin-left:.5rem}\
    footer{margin-top:3rem;color:#777;font-size:.85rem}";

/// Renders the job and resume analyses into one standalone HTML page.
pub fn render_report(
    job_analysis: &Value,
    resume_analysis: &Value,
    generated_at: DateTime<Utc>,
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Interview Preparation Report</title>\n");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n<h1>Interview Preparation Report</h1>\n");

    html.push_str("<h2>Job Analysis</h2>\n<section>\n");
    render_value(job_analysis, 3, &mut html);
    html.push_str("</section>\n");

    html.push_str("<h2>Resume Analysis</h2>\n<section>\n");
    render_value(resume_analysis, 3, &mut html);
    html.push_str("</section>\n");

    let _ = writeln!(
        html,
        "<footer>Generated {}</footer>",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn render_value(value: &Value, level: usize, out: &mut String) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let title = escape_html(&humanize_key(key));
                if is_scalar(child) {
                    let _ = writeln!(
                        out,
                        "<p><strong>{title}:</strong> {}</p>",
                        escape_html(&scalar_text(child))
                    );
                } else {
                    let level = level.min(MAX_HEADING_LEVEL);
                    let _ = writeln!(out, "<h{level}>{title}</h{level}>");
                    out.push_str("<section>\n");
                    render_value(child, level + 1, out);
                    out.push_str("</section>\n");
                }
            }
        }
        Value::Array(items) => {
            out.push_str("<ul>\n");
            for item in items {
                if is_scalar(item) {
                    let _ = writeln!(out, "<li>{}</li>", escape_html(&scalar_text(item)));
                } else {
                    out.push_str("<li>\n");
                    render_value(item, level, out);
                    out.push_str("</li>\n");
                }
            }
            out.push_str("</ul>\n");
        }
        scalar => {
            let _ = writeln!(out, "<p>{}</p>", escape_html(&scalar_text(scalar)));
        }
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Null => "n/a".to_string(),
        other => other.to_string(),
    }
}

/// `years_of_experience` → "Years Of Experience". Keys the model already
/// spelled out ("Key Responsibilities") pass through unchanged.
pub fn humanize_key(key: &str) -> String {
    key.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("years_of_experience"), "Years Of Experience");
        assert_eq!(humanize_key("Key Responsibilities"), "Key Responsibilities");
        assert_eq!(humanize_key("nice-to-have"), "Nice To Have");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_report_sections_and_lists() {
        let job = json!({
            "job_title": "Backend Engineer",
            "technical_requirements": {
                "required_skills": ["Rust", "PostgreSQL"]
            }
        });
        let resume = json!({"executive_summary": {"overall_match_percentage": 82}});

        let html = render_report(&job, &resume, fixed_time());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<p><strong>Job Title:</strong> Backend Engineer</p>"));
        assert!(html.contains("<h3>Technical Requirements</h3>"));
        assert!(html.contains("<h4>Required Skills</h4>"));
        assert!(html.contains("<li>Rust</li>"));
        assert!(html.contains("<strong>Overall Match Percentage:</strong> 82"));
        assert!(html.contains("Generated 2026-03-01 09:30:00 UTC"));
    }

    #[test]
    fn test_render_report_escapes_model_text() {
        let job = json!({"company_name": "<img src=x onerror=alert(1)>"});
        let html = render_report(&job, &json!({}), fixed_time());
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn test_deep_nesting_caps_heading_level() {
        let deep = json!({"a": {"b": {"c": {"d": {"e": {"f": ["leaf"]}}}}}});
        let html = render_report(&deep, &json!({}), fixed_time());
        assert!(!html.contains("<h7>"));
        assert!(html.contains("<li>leaf</li>"));
    }

    #[test]
    fn test_fallback_analysis_renders_as_text() {
        let resume = json!({"analysis": "Strong match overall.", "parse_error": "invalid JSON"});
        let html = render_report(&json!({}), &resume, fixed_time());
        assert!(html.contains("<strong>Analysis:</strong> Strong match overall."));
    }
}
