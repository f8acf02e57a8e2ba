use serde_json::{json, Value};
use tracing::warn;

use crate::llm_client::reconcile::{reconcile, ReconciledResponse};
use crate::llm_client::CompletionClient;

/// Outcome of one LLM enrichment step.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// The model answered; its text has been reconciled.
    Enriched(ReconciledResponse),
    /// The model could not be reached. `input` is the data the step started from.
    Degraded { input: Value, note: String },
}

impl Analysis {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Analysis::Degraded { .. })
    }

    /// JSON form returned to callers and written to disk.
    /// A degraded step is its input with a `note` field added.
    pub fn into_value(self) -> Value {
        match self {
            Analysis::Enriched(response) => response.into_value(),
            Analysis::Degraded { input, note } => match input {
                Value::Object(mut map) => {
                    map.insert("note".to_string(), Value::String(note));
                    Value::Object(map)
                }
                other => json!({ "input": other, "note": note }),
            },
        }
    }
}

/// Submits one prompt. A submission failure is absorbed into `Analysis::Degraded`;
/// `input` is only built on that path.
pub async fn enrich(
    llm: &dyn CompletionClient,
    stage: &str,
    system: &str,
    prompt: &str,
    input: impl FnOnce() -> Value,
) -> Analysis {
    match llm.complete(system, prompt).await {
        Ok(text) => {
            let response = reconcile(&text);
            if let ReconciledResponse::Fallback { reason, .. } = &response {
                warn!("{stage}: model output kept as text ({reason})");
            }
            Analysis::Enriched(response)
        }
        Err(e) => {
            warn!("{stage} failed, continuing with unenriched data: {e}");
            Analysis::Degraded {
                input: input(),
                note: format!("{stage} failed: {e}"),
            }
        }
    }
}
