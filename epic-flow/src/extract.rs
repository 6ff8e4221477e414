//! Extraction node: raw epic text to the fixed five-element set.

use epic_core::{CompletionModel, PacingPolicy};
use serde_json::Value;
use tracing::debug;

use crate::decode::decode_json_object;
use crate::error::Result;
use crate::state::{ElementKind, ElementSet, EpicState};

/// One generation call, tolerant decode, then unconditional backfill so
/// the element-set invariant (all five keys present) holds no matter what
/// the service returned. A response with no recoverable JSON object is
/// fatal to this epic.
pub(crate) async fn run(
    model: &dyn CompletionModel,
    pacing: &PacingPolicy,
    state: &mut EpicState,
) -> Result<()> {
    let prompt = extraction_prompt(&state.doc.text);
    let raw = model.complete(&prompt).await;
    pacing.settle_after_call().await;

    let parsed = decode_json_object(&raw?)?;

    let mut elements = ElementSet::default();
    for kind in ElementKind::ALL {
        let content = match parsed.get(kind.as_str()) {
            Some(Value::String(text)) => text.trim().to_string(),
            Some(Value::Null) | None => String::new(),
            // Tolerate a model that returns nested structure for a section.
            Some(other) => other.to_string(),
        };
        elements.set(kind, content);
    }

    let populated = elements.iter().filter(|(_, content)| !content.is_empty()).count();
    debug!(epic = state.doc.index, populated, "extracted elements");

    state.elements = Some(elements);
    Ok(())
}

fn extraction_prompt(epic_text: &str) -> String {
    format!(
        r#"Extract and organize the following elements from the epic text. If an element is not present, leave it empty.

Elements to extract:
- Title: The title of the epic
- Problem Statement: The problem being addressed
- Product Outcome & Instrumentation: The measurable outcomes and how they will be measured
- Requirements - User Stories: The user stories describing functionality
- Non-Functional Requirements: Any non-functional requirements specified

Return in this exact JSON format:
{{
    "Title": "extracted title",
    "Problem Statement": "extracted problem statement",
    "Product Outcome & Instrumentation": "extracted outcomes",
    "Requirements - User Stories": "extracted user stories",
    "Non-Functional Requirements": "extracted NFRs"
}}

Epic Text:
{epic_text}"#
    )
}
