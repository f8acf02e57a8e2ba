//! DOCX text via docx-rs.
//!
//! A .docx is a ZIP of XML parts; docx-rs gives us the typed tree
//! Document → Paragraph → Run → Text. Top-level paragraphs are joined with
//! newlines, empty ones included. Table contents are not read.

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

pub(super) fn extract(bytes: &[u8]) -> Result<String, String> {
    let docx = read_docx(bytes).map_err(|e| format!("{e:?}"))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_runs(&paragraph.children, &mut text);
    text
}

// Runs in one paragraph are fragments of the same line: no separator.
fn push_runs(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_runs(&link.children, out),
            _ => {}
        }
    }
}
