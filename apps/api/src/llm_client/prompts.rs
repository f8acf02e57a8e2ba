// Shared prompt fragments. Each pipeline stage keeps its own templates in
// pipeline/prompts.rs; only cross-cutting pieces live here.

/// Appended to every analysis prompt. Models still ignore it sometimes,
/// which is what `reconcile` is for.
pub const JSON_ONLY_INSTRUCTION: &str = "Return ONLY valid JSON format. \
    Do not include markdown code blocks or any other text.";
