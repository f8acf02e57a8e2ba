/// Page-by-page PDF text. Pages with no text are skipped; each kept page is
/// followed by a newline.
pub(super) fn extract(bytes: &[u8]) -> Result<String, String> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| e.to_string())?;
    Ok(join_pages(pages))
}

fn join_pages(pages: impl IntoIterator<Item = String>) -> String {
    let mut text = String::new();
    for page in pages {
        let page = page.trim_end();
        if page.trim().is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text
}
